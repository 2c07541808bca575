use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{Client, Gender};

const MALE_FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Paulo", "Lucas", "Rafael", "Bruno",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Nancy", "Lisa", "Ana", "Juliana", "Camila", "Beatriz", "Larissa", "Fernanda",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Wilson", "Anderson", "Taylor", "Moore", "Silva", "Santos", "Oliveira", "Souza",
    "Pereira", "Costa", "Almeida", "Ferreira",
];

const PHONE_PATTERN: &str = "(##) ####-####";

/// Generate `count` clients with sequential ids starting at 1
pub fn generate_clients<R: Rng>(count: i32, rng: &mut R, email_domain: &str) -> Vec<Client> {
    let now = Utc::now();
    (1..=count)
        .map(|id| generate_client(id, rng, email_domain, now))
        .collect()
}

/// Generate a single client with the given id, with timestamps relative to `now`
pub fn generate_client<R: Rng>(
    id: i32,
    rng: &mut R,
    email_domain: &str,
    now: DateTime<Utc>,
) -> Client {
    let gender = pick(rng, &Gender::ALL, Gender::Male);
    let first_names = match gender {
        Gender::Male => MALE_FIRST_NAMES,
        Gender::Female => FEMALE_FIRST_NAMES,
    };
    let first = pick(rng, first_names, "Alex");
    let last = pick(rng, LAST_NAMES, "Doe");

    let created_at = random_instant(rng, now - Duration::days(2 * 365), now);
    let updated_at = random_instant(rng, created_at, now);

    Client {
        id,
        name: format!("{} {}", first, last),
        email: format!("{}.{}@{}", first, last, email_domain).to_lowercase(),
        gender,
        phone: fill_pattern(rng, PHONE_PATTERN),
        created_at,
        updated_at,
        enabled: false,
    }
}

fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T], fallback: T) -> T {
    items.choose(rng).copied().unwrap_or(fallback)
}

/// Replace every `#` in `pattern` with a random decimal digit
fn fill_pattern<R: Rng>(rng: &mut R, pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '#' => char::from(b'0' + rng.gen_range(0..10u8)),
            other => other,
        })
        .collect()
}

fn random_instant<R: Rng>(rng: &mut R, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        return start;
    }

    let ts = rng.gen_range(start_ts..=end_ts);
    DateTime::from_timestamp(ts, 0).unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let clients = generate_clients(100, &mut rng, "api.doc");

        assert_eq!(clients.len(), 100);
        for (i, client) in clients.iter().enumerate() {
            assert_eq!(client.id, i as i32 + 1);
        }
    }

    #[test]
    fn test_fields_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let clients = generate_clients(50, &mut rng, "api.doc");
        let now = Utc::now();

        for client in clients {
            assert!(!client.enabled);
            assert!(client.email.ends_with("@api.doc"));
            assert_eq!(client.email, client.email.to_lowercase());
            assert_eq!(client.name.split(' ').count(), 2);
            assert!(client.created_at <= client.updated_at);
            assert!(client.updated_at <= now);

            let first = client.name.split(' ').next().unwrap();
            match client.gender {
                Gender::Male => assert!(MALE_FIRST_NAMES.contains(&first)),
                Gender::Female => assert!(FEMALE_FIRST_NAMES.contains(&first)),
            }
        }
    }

    #[test]
    fn test_phone_follows_pattern() {
        let mut rng = StdRng::seed_from_u64(1);
        let phone = fill_pattern(&mut rng, PHONE_PATTERN);

        assert_eq!(phone.len(), PHONE_PATTERN.len());
        for (p, c) in PHONE_PATTERN.chars().zip(phone.chars()) {
            if p == '#' {
                assert!(c.is_ascii_digit());
            } else {
                assert_eq!(p, c);
            }
        }
    }

    #[test]
    fn test_same_seed_same_names() {
        let a = generate_clients(10, &mut StdRng::seed_from_u64(3), "api.doc");
        let b = generate_clients(10, &mut StdRng::seed_from_u64(3), "api.doc");

        let names_a: Vec<_> = a.iter().map(|c| (&c.name, c.gender, &c.phone)).collect();
        let names_b: Vec<_> = b.iter().map(|c| (&c.name, c.gender, &c.phone)).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_zero_or_negative_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_clients(0, &mut rng, "api.doc").is_empty());
        assert!(generate_clients(-3, &mut rng, "api.doc").is_empty());
    }
}
