#![forbid(unsafe_code)]

//! Sample member records for the demo.

use std::borrow::Cow;
use tabulon::RowKey;

/// Membership status shown as a badge in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Pending,
    Alumni,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Pending => "pending",
            Status::Alumni => "alumni",
        }
    }
}

/// One association member record.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: String,
    pub name: &'static str,
    pub email: &'static str,
    pub program: &'static str,
    pub year: u32,
    pub status: Status,
    pub visits: Option<u64>,
}

impl RowKey for Member {
    fn row_key(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.id))
    }
}

/// The demo dataset.
pub fn members() -> Vec<Member> {
    let seed: &[(&str, &str, &str, u32, Status, Option<u64>)] = &[
        ("Amara Okafor", "amara@campus.edu", "Computer Eng", 3, Status::Active, Some(14)),
        ("Bram Visser", "bram@campus.edu", "Mechatronics", 2, Status::Active, Some(9)),
        ("Chiara Rossi", "chiara@campus.edu", "Software Eng", 4, Status::Alumni, Some(31)),
        ("Dana Petrov", "dana@campus.edu", "Electrical Eng", 1, Status::Pending, None),
        ("Emre Kaya", "emre@campus.edu", "Computer Eng", 2, Status::Active, Some(0)),
        ("Farah Haddad", "farah@campus.edu", "Civil Eng", 3, Status::Active, Some(22)),
        ("Goran Ilic", "goran@campus.edu", "Software Eng", 2, Status::Pending, None),
        ("Hana Suzuki", "hana@campus.edu", "Mechatronics", 4, Status::Alumni, Some(40)),
        ("Ines Moreau", "ines@campus.edu", "Electrical Eng", 1, Status::Active, Some(2)),
        ("Jonas Berg", "jonas@campus.edu", "Computer Eng", 3, Status::Active, Some(17)),
        ("Kofi Mensah", "kofi@campus.edu", "Civil Eng", 2, Status::Active, Some(5)),
        ("Lena Fischer", "lena@campus.edu", "Software Eng", 1, Status::Pending, None),
        ("Marco Silva", "marco@campus.edu", "Mechatronics", 3, Status::Active, Some(11)),
        ("Nadia Rahman", "nadia@campus.edu", "Computer Eng", 4, Status::Alumni, Some(28)),
        ("Oren Levi", "oren@campus.edu", "Electrical Eng", 2, Status::Active, Some(7)),
        ("Priya Nair", "priya@campus.edu", "Software Eng", 3, Status::Active, Some(19)),
        ("Quentin Dubois", "quentin@campus.edu", "Civil Eng", 1, Status::Pending, Some(1)),
        ("Rosa Jimenez", "rosa@campus.edu", "Computer Eng", 2, Status::Active, Some(13)),
        ("Sami Al-Farsi", "sami@campus.edu", "Mechatronics", 4, Status::Alumni, Some(35)),
        ("Tove Lindqvist", "tove@campus.edu", "Electrical Eng", 3, Status::Active, Some(8)),
        ("Umut Demir", "umut@campus.edu", "Software Eng", 2, Status::Active, Some(4)),
        ("Vera Kovacs", "vera@campus.edu", "Civil Eng", 1, Status::Pending, None),
        ("Wei Zhang", "wei@campus.edu", "Computer Eng", 3, Status::Active, Some(26)),
        ("Ximena Castro", "ximena@campus.edu", "Mechatronics", 2, Status::Active, Some(6)),
        ("Yusuf Osman", "yusuf@campus.edu", "Electrical Eng", 4, Status::Alumni, Some(33)),
        ("Zofia Nowak", "zofia@campus.edu", "Software Eng", 1, Status::Active, Some(3)),
    ];

    seed.iter()
        .enumerate()
        .map(|(i, &(name, email, program, year, status, visits))| Member {
            id: format!("mem-{:03}", i + 1),
            name,
            email,
            program,
            year,
            status,
            visits,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let members = members();
        let mut ids: Vec<_> = members.iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), members.len());
    }

    #[test]
    fn rows_carry_keys() {
        let members = members();
        assert_eq!(members[0].row_key().as_deref(), Some("mem-001"));
    }
}
