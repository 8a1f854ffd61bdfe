// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use alumni_app::COLUMN_COUNT;

const FIRST_NAMES: [&str; 18] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan", "Priya", "Mateo",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Nakamura", "Okafor",
];

const ROLES: [&str; 14] = [
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "Analyst",
    "Consultant",
    "Designer",
    "Research Scientist",
    "Founder",
    "Engineering Manager",
    "Investment Banker",
    "Site Reliability Engineer",
    "Lecturer",
    "Attorney",
    "Physician",
];

const COMPANY_ROOTS: [&str; 14] = [
    "Initech", "Globex", "Umbrella", "Hooli", "Stark", "Wayne", "Acme", "Soylent", "Vandelay",
    "Cyberdyne", "Tyrell", "Aperture", "Wonka", "Massive",
];
const COMPANY_SUFFIXES: [&str; 6] = ["Labs", "Systems", "Group", "Partners", "Inc", "Co"];

const DOMAINS: [&str; 10] = [
    "Software",
    "Finance",
    "Healthcare",
    "Education",
    "Consulting",
    "Product",
    "Research",
    "Law",
    "Energy",
    "Media",
];

/// One generated directory entry. Field order matches the table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alumnus {
    pub sr_no: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub domain: String,
}

impl Alumnus {
    pub fn into_cells(self) -> [String; COLUMN_COUNT] {
        [self.sr_no, self.name, self.role, self.company, self.domain]
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for demo rosters. The same seed always yields the same
/// rows.
#[derive(Debug, Clone)]
pub struct AlumniFaker {
    rng: DeterministicRng,
    seed: u64,
    next_serial: usize,
}

impl AlumniFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            next_serial: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn alumnus(&mut self) -> Alumnus {
        let sr_no = self.next_serial.to_string();
        self.next_serial += 1;
        Alumnus {
            sr_no,
            name: self.full_name(),
            role: self.pick(&ROLES).to_owned(),
            company: self.company(),
            domain: self.pick(&DOMAINS).to_owned(),
        }
    }

    /// `count` alumni with serials `1..=count`, in a shuffled display order so
    /// sorting by serial visibly changes the table.
    pub fn roster(&mut self, count: usize) -> Vec<Alumnus> {
        let mut alumni = (0..count).map(|_| self.alumnus()).collect::<Vec<_>>();
        for index in (1..alumni.len()).rev() {
            let swap = self.rng.int_n(index + 1);
            alumni.swap(index, swap);
        }
        alumni
    }

    pub fn roster_cells(&mut self, count: usize) -> Vec<[String; COLUMN_COUNT]> {
        self.roster(count)
            .into_iter()
            .map(Alumnus::into_cells)
            .collect()
    }

    fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn company(&mut self) -> String {
        let root = self.pick(&COMPANY_ROOTS);
        if self.rng.bool() {
            format!("{root} {}", self.pick(&COMPANY_SUFFIXES))
        } else {
            root.to_owned()
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// Small hand-written roster with awkward cells: mixed case, an embedded
/// comma, an embedded quote, a non-ASCII name and a non-numeric serial.
pub fn fixture_roster() -> Vec<[String; COLUMN_COUNT]> {
    [
        ["3", "Carol Diaz", "Engineer", "Initech", "Software"],
        ["1", "alice Young", "Analyst", "Globex, Ltd", "Finance"],
        ["2", "Bob \"Bobby\" Reed", "Designer", "Initech", "Product"],
        ["10", "Émile Okafor", "Professor", "Sorbonne", "Education"],
        ["n/a", "Dana Hill", "Consultant", "Hooli", "Consulting"],
    ]
    .into_iter()
    .map(|record| record.map(str::to_owned))
    .collect()
}
