//! Curated topics for random queries.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::OnceLock;

const CURATED_SOURCE: &[&str] = &[
    // Dualities
    "Balance", "Harmony", "Discord", "Unity", "Fragmentation", "Clarity", "Ambiguity",
    "Presence", "Absence", "Creation", "Destruction", "Light", "Shadow", "Beginning",
    "Ending", "Rising", "Falling", "Connection", "Isolation", "Hope", "Despair",
    "Order and chaos", "Light and shadow", "Sound and silence", "Form and formlessness",
    "Being and nonbeing", "Presence and absence", "Motion and stillness",
    "Unity and multiplicity", "Finite and infinite", "Sacred and profane",
    "Memory and forgetting", "Question and answer", "Search and discovery",
    "Journey and destination", "Dream and reality", "Time and eternity", "Self and other",
    "Known and unknown", "Spoken and unspoken", "Visible and invisible",
    // Motion
    "Zigzag", "Waves", "Spiral", "Bounce", "Slant", "Drip", "Stretch", "Squeeze", "Float",
    "Fall", "Spin", "Melt", "Rise", "Twist", "Explode", "Stack", "Mirror", "Echo", "Vibrate",
    // Physics
    "Gravity", "Friction", "Momentum", "Inertia", "Turbulence", "Pressure", "Tension",
    "Oscillate", "Fractal", "Quantum", "Entropy", "Vortex", "Resonance", "Equilibrium",
    "Centrifuge", "Elastic", "Viscous", "Refract", "Diffuse", "Cascade", "Levitate",
    "Magnetize", "Polarize", "Accelerate", "Compress", "Undulate",
    // Liminal
    "Liminal", "Ephemeral", "Paradox", "Zeitgeist", "Metamorphosis", "Synesthesia",
    "Recursion", "Emergence", "Dialectic", "Apophenia", "Limbo", "Flux", "Sublime",
    "Uncanny", "Palimpsest", "Chimera", "Void", "Transcend", "Ineffable", "Qualia",
    "Gestalt", "Simulacra", "Abyssal",
    // Philosophy and literature
    "Existential", "Nihilism", "Solipsism", "Phenomenology", "Hermeneutics",
    "Deconstruction", "Postmodern", "Absurdism", "Catharsis", "Epiphany", "Melancholy",
    "Nostalgia", "Longing", "Reverie", "Pathos", "Ethos", "Logos", "Mythos", "Anamnesis",
    "Intertextuality", "Metafiction", "Stream", "Lacuna", "Caesura", "Enjambment",
];

/// The curated topic list with duplicates removed, in first-seen order.
pub fn curated_topics() -> &'static [&'static str] {
    static UNIQUE: OnceLock<Vec<&'static str>> = OnceLock::new();
    UNIQUE.get_or_init(|| {
        let mut seen = HashSet::new();
        CURATED_SOURCE
            .iter()
            .copied()
            .filter(|topic| seen.insert(*topic))
            .collect()
    })
}

/// Pick one curated topic uniformly at random.
pub fn pick_random_topic<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let topics = curated_topics();
    // The list is a non-empty constant.
    topics.choose(rng).copied().unwrap_or("Wiki")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn curated_list_has_no_duplicates() {
        let topics = curated_topics();
        let unique: HashSet<_> = topics.iter().collect();
        assert_eq!(unique.len(), topics.len());
    }

    #[test]
    fn curated_list_keeps_every_source_entry() {
        let topics = curated_topics();
        for source in CURATED_SOURCE {
            assert!(topics.contains(source));
        }
        assert!(topics.len() <= CURATED_SOURCE.len());
    }

    #[test]
    fn random_pick_stays_within_list() {
        let mut rng = StdRng::seed_from_u64(42);
        let topics = curated_topics();
        for _ in 0..500 {
            assert!(topics.contains(&pick_random_topic(&mut rng)));
        }
    }

    #[test]
    fn random_pick_reaches_more_than_one_topic() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks: HashSet<_> = (0..200).map(|_| pick_random_topic(&mut rng)).collect();
        assert!(picks.len() > 1);
    }
}
