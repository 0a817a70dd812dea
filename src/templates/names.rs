//! Name pools used to populate generated teams.
//! Within each `first` list the first half reads as male, the second half as female.

use crate::commands::context::Gender;

pub struct NameTable {
    pub country: &'static str,
    pub first: &'static [&'static str],
    pub last: &'static [&'static str],
}

pub const DEFAULT_COUNTRY: &str = "United States";

pub static NAME_TABLES: &[NameTable] = &[
    NameTable {
        country: "United States",
        first: &[
            "James", "Michael", "Robert", "John", "David", "William", "Richard", "Joseph",
            "Thomas", "Christopher", "Sarah", "Jessica", "Emily", "Ashley", "Amanda", "Melissa",
            "Deborah", "Michelle", "Lisa", "Nancy",
        ],
        last: &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas",
            "Taylor", "Moore", "Jackson", "Martin", "Lee",
        ],
    },
    NameTable {
        country: "India",
        first: &[
            "Priya", "Raj", "Amit", "Ananya", "Rahul", "Sneha", "Vikram", "Kavita", "Arjun",
            "Meera", "Suresh", "Deepika", "Rohan", "Neha", "Karan", "Pooja",
        ],
        last: &[
            "Patel", "Sharma", "Kumar", "Singh", "Gupta", "Reddy", "Mehta", "Desai", "Joshi",
            "Shah", "Iyer", "Nair", "Rao", "Malhotra", "Agarwal", "Verma",
        ],
    },
    NameTable {
        country: "United Kingdom",
        first: &[
            "James", "John", "Robert", "Michael", "William", "David", "Richard", "Charles",
            "Joseph", "Thomas", "Emma", "Olivia", "Sophia", "Isabella", "Charlotte", "Amelia",
            "Mia", "Harper", "Evelyn", "Abigail",
        ],
        last: &[
            "Smith", "Jones", "Taylor", "Williams", "Brown", "Davies", "Evans", "Wilson",
            "Thomas", "Roberts", "Johnson", "Lewis", "Walker", "Robinson", "Wood", "Thompson",
            "White", "Watson", "Jackson", "Wright",
        ],
    },
    NameTable {
        country: "Australia",
        first: &[
            "James", "William", "Oliver", "Jack", "Henry", "Thomas", "Lucas", "Noah", "Charlie",
            "Ethan", "Charlotte", "Olivia", "Amelia", "Isla", "Ava", "Mia", "Grace", "Chloe",
            "Ruby", "Willow",
        ],
        last: &[
            "Smith", "Jones", "Williams", "Brown", "Wilson", "Taylor", "Johnson", "White",
            "Martin", "Anderson", "Thompson", "Nguyen", "Thomas", "Walker", "Harris", "Lee",
            "Ryan", "Robinson", "Kelly", "King",
        ],
    },
    NameTable {
        country: "Germany",
        first: &[
            "Maximilian", "Alexander", "Paul", "Lukas", "Leon", "Luka", "Ben", "Jonas", "Noah",
            "Felix", "Emma", "Hannah", "Mia", "Sophia", "Emilia", "Lina", "Marie", "Mila", "Ella",
            "Lea",
        ],
        last: &[
            "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker",
            "Schulz", "Hoffmann", "Schafer", "Koch", "Bauer", "Richter", "Klein", "Wolf",
            "Schroder", "Neumann", "Schwarz", "Zimmermann",
        ],
    },
    NameTable {
        country: "France",
        first: &[
            "Lucas", "Lucas", "Hugo", "Louis", "Gabriel", "Léo", "Raphaël", "Nathan", "Adam",
            "Arthur", "Emma", "Jade", "Louise", "Alice", "Chloé", "Lina", "Mila", "Rose", "Anna",
            "Inès",
        ],
        last: &[
            "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand",
            "Leroy", "Moreau", "Simon", "Laurent", "Lefebvre", "Michel", "Garcia", "David",
            "Bertrand", "Roux", "Vincent", "Fournier",
        ],
    },
    NameTable {
        country: "Japan",
        first: &[
            "Hiroshi", "Takeshi", "Kenji", "Yuki", "Satoshi", "Akira", "Daiki", "Ryota", "Yuto",
            "Kaito", "Yuki", "Sakura", "Aoi", "Hana", "Mei", "Rin", "Yui", "Akari", "Emi", "Mio",
        ],
        last: &[
            "Tanaka", "Sato", "Suzuki", "Takahashi", "Watanabe", "Ito", "Yamamoto", "Nakamura",
            "Kobayashi", "Kato", "Yoshida", "Yamada", "Sasaki", "Yamaguchi", "Saito",
            "Matsumoto", "Inoue", "Kimura", "Hayashi", "Shimizu",
        ],
    },
    NameTable {
        country: "China",
        first: &[
            "Wei", "Ming", "Jie", "Lei", "Feng", "Jun", "Tao", "Yong", "Hui", "Xin", "Li", "Wang",
            "Zhang", "Liu", "Chen", "Yang", "Huang", "Zhao", "Wu", "Zhou",
        ],
        last: &[
            "Wang", "Li", "Zhang", "Liu", "Chen", "Yang", "Huang", "Zhao", "Wu", "Zhou", "Xu",
            "Sun", "Ma", "Zhu", "Hu", "Guo", "He", "Gao", "Lin", "Luo",
        ],
    },
    NameTable {
        country: "Brazil",
        first: &[
            "Miguel", "Arthur", "Davi", "Gabriel", "Bernardo", "Lucas", "Matheus", "Rafael",
            "Heitor", "Enzo", "Maria", "Ana", "Julia", "Beatriz", "Mariana", "Gabriela",
            "Rafaela", "Larissa", "Fernanda", "Amanda",
        ],
        last: &[
            "Silva", "Santos", "Oliveira", "Souza", "Rodrigues", "Ferreira", "Alves", "Pereira",
            "Lima", "Gomes", "Ribeiro", "Carvalho", "Almeida", "Lopes", "Soares", "Fernandes",
            "Vieira", "Barbosa", "Rocha", "Dias",
        ],
    },
];

/// Fallback people fetched after the team so the faces directory never runs dry.
pub static GENERIC_AVATAR_PEOPLE: &[(&str, Gender)] = &[
    ("Alex Johnson", Gender::Male),
    ("Sarah Williams", Gender::Female),
    ("Chris Martinez", Gender::Male),
    ("Emma Wilson", Gender::Female),
    ("Jordan Lee", Gender::Neutral),
    ("Taylor Brown", Gender::Neutral),
    ("Casey Smith", Gender::Neutral),
    ("Morgan Davis", Gender::Neutral),
    ("Riley Johnson", Gender::Neutral),
    ("Avery Taylor", Gender::Neutral),
];
