use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use stave_domain::{Note, NoteCatalog, StaffMode};
use tracing::trace;

/// Draws practice notes uniformly at random from the staves a mode allows.
pub struct NoteSelector {
    rng: SmallRng,
}

impl NoteSelector {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic selector for reproducible sessions and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks the next note. Relies on [`NoteCatalog::new`] having rejected
    /// catalogs with an empty staff, so the filtered set is never empty.
    pub fn select_next(&mut self, catalog: &NoteCatalog, staff_mode: StaffMode) -> Note {
        let candidates = catalog.notes(staff_mode);
        let index = self.rng.gen_range(0..candidates.len());
        trace!(%staff_mode, index, pool = candidates.len(), "selected note");
        candidates[index].clone()
    }
}

impl Default for NoteSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use stave_domain::Staff;

    #[test]
    fn treble_mode_only_draws_treble_notes() {
        let catalog = NoteCatalog::standard();
        let mut selector = NoteSelector::seeded(7);
        for _ in 0..500 {
            assert_eq!(
                selector.select_next(&catalog, StaffMode::Treble).staff,
                Staff::Treble
            );
        }
    }

    #[test]
    fn bass_mode_only_draws_bass_notes() {
        let catalog = NoteCatalog::standard();
        let mut selector = NoteSelector::seeded(11);
        for _ in 0..500 {
            assert_eq!(
                selector.select_next(&catalog, StaffMode::Bass).staff,
                Staff::Bass
            );
        }
    }

    #[test]
    fn both_mode_reaches_every_note() {
        let catalog = NoteCatalog::standard();
        let mut selector = NoteSelector::seeded(3);
        let seen: HashSet<Note> = (0..5_000)
            .map(|_| selector.select_next(&catalog, StaffMode::Both))
            .collect();
        assert_eq!(seen.len(), catalog.all_notes().len());
    }

    #[test]
    fn seeded_selectors_repeat() {
        let catalog = NoteCatalog::standard();
        let mut a = NoteSelector::seeded(42);
        let mut b = NoteSelector::seeded(42);
        for _ in 0..20 {
            assert_eq!(
                a.select_next(&catalog, StaffMode::Both),
                b.select_next(&catalog, StaffMode::Both)
            );
        }
    }
}
