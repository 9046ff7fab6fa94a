//! Weighted name pools for generated people and clubs

use std::collections::BTreeSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

const FORENAMES: &[(&str, u16)] = &[
    ("James", 9),
    ("Daniel", 8),
    ("Luca", 6),
    ("Marco", 5),
    ("Thomas", 8),
    ("Samuel", 6),
    ("Oliver", 7),
    ("Mateo", 5),
    ("Jonas", 4),
    ("Lars", 3),
    ("Hugo", 5),
    ("Adrien", 3),
    ("Kofi", 3),
    ("Yusuf", 4),
    ("Diego", 5),
    ("Ivan", 4),
    ("Rafael", 5),
    ("Nico", 4),
    ("Emil", 3),
    ("Tomas", 4),
    ("Kenji", 2),
    ("Callum", 4),
    ("Ryan", 6),
    ("Felix", 4),
    ("Andre", 4),
    ("Mikel", 3),
    ("Sven", 2),
    ("Pavel", 3),
    ("Bruno", 4),
    ("Leon", 5),
];

const SURNAMES: &[(&str, u16)] = &[
    ("Walker", 6),
    ("Moreno", 5),
    ("Bianchi", 4),
    ("Fischer", 5),
    ("Okafor", 3),
    ("Jensen", 4),
    ("Novak", 4),
    ("Duarte", 4),
    ("Hughes", 6),
    ("Keller", 4),
    ("Lindqvist", 2),
    ("Mensah", 3),
    ("Costa", 6),
    ("Petrov", 3),
    ("Schmidt", 5),
    ("Dubois", 4),
    ("Rossi", 5),
    ("Kowalski", 3),
    ("Murphy", 5),
    ("Santos", 6),
    ("Yilmaz", 3),
    ("Berg", 3),
    ("Ward", 4),
    ("Lambert", 3),
    ("Navarro", 4),
    ("Horvat", 2),
    ("Baker", 5),
    ("Vidal", 3),
    ("Sato", 2),
    ("Ferreira", 4),
    ("Clarke", 5),
    ("Ibrahim", 3),
];

const TOWNS: &[&str] = &[
    "Ashford",
    "Bramley",
    "Carrow",
    "Dunmore",
    "Eastleigh",
    "Fenwick",
    "Glenholm",
    "Harrowgate",
    "Ironbridge",
    "Kestrel Bay",
    "Larkhill",
    "Marston",
    "Northby",
    "Oakridge",
    "Portmere",
    "Queensferry",
    "Redcliff",
    "Stanmoor",
    "Thornbury",
    "Upton",
    "Valemouth",
    "Westbrook",
    "Yarrow",
    "Caldwell",
    "Brightwater",
    "Millford",
    "Stonehaven",
    "Hollins",
    "Ravensworth",
    "Sandpoint",
];

const CLUB_SUFFIXES: &[&str] = &[
    "United",
    "City",
    "Athletic",
    "Rovers",
    "Town",
    "Albion",
    "Wanderers",
    "FC",
];

fn draw(pool: &[(&'static str, u16)], rng: &mut impl Rng) -> &'static str {
    match WeightedIndex::new(pool.iter().map(|(_, weight)| *weight)) {
        Ok(index) => pool[index.sample(rng)].0,
        Err(_) => pool.first().map_or("", |(name, _)| *name),
    }
}

/// "Forename Surname"
pub fn person_name(rng: &mut impl Rng) -> String {
    format!("{} {}", draw(FORENAMES, rng), draw(SURNAMES, rng))
}

/// `count` distinct club names
pub fn club_names(count: usize, rng: &mut impl Rng) -> Vec<String> {
    let mut towns: Vec<&str> = TOWNS.to_vec();
    towns.shuffle(rng);

    let mut used = BTreeSet::new();
    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let town = towns[i % towns.len()];
        let suffix = CLUB_SUFFIXES.choose(rng).copied().unwrap_or("FC");
        let mut name = format!("{} {}", town, suffix);
        // Large worlds run out of towns; number the repeats
        let mut n = 2;
        while used.contains(&name) {
            name = format!("{} {} {}", town, CLUB_SUFFIXES[n % CLUB_SUFFIXES.len()], n);
            n += 1;
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_club_names_are_unique() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let names = club_names(100, &mut rng);
        let unique: BTreeSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn test_person_name_has_two_parts() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(person_name(&mut rng).split(' ').count(), 2);
    }
}
