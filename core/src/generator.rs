use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// Seed for live play, derived from the wall clock.
pub(crate) fn seed_from_time() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Picks `count` distinct cells not yet marked in `occupied`, uniformly at random.
///
/// Shuffles the free cells and takes a prefix.
pub(crate) fn pick_free_cells<R: Rng + ?Sized>(
    occupied: &Array2<bool>,
    size: Coord2,
    count: CellCount,
    rng: &mut R,
) -> Result<Vec<Coord2>> {
    let mut free_cells: Vec<Coord2> = iter_coords(size)
        .filter(|&coords| !occupied[coords.to_nd_index()])
        .collect();

    let count = count as usize;
    if count > free_cells.len() {
        log::debug!(
            "Cannot place {} mines, only {} free cells",
            count,
            free_cells.len()
        );
        return Err(GameError::InvalidSize);
    }

    free_cells.shuffle(rng);
    free_cells.truncate(count);
    Ok(free_cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn picks_distinct_free_cells() {
        let mut occupied: Array2<bool> = Array2::default([4, 4]);
        occupied[[0, 0]] = true;
        let mut rng = SmallRng::seed_from_u64(42);

        let mut picked = pick_free_cells(&occupied, (4, 4), 15, &mut rng).unwrap();

        assert!(!picked.contains(&(0, 0)));
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 15);
    }

    #[test]
    fn same_seed_same_cells() {
        let occupied: Array2<bool> = Array2::default([8, 8]);

        let first = pick_free_cells(&occupied, (8, 8), 10, &mut SmallRng::seed_from_u64(7));
        let second = pick_free_cells(&occupied, (8, 8), 10, &mut SmallRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn too_many_cells_is_rejected() {
        let mut occupied: Array2<bool> = Array2::default([2, 2]);
        occupied[[1, 1]] = true;
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            pick_free_cells(&occupied, (2, 2), 4, &mut rng),
            Err(GameError::InvalidSize)
        );
        assert_eq!(pick_free_cells(&occupied, (2, 2), 3, &mut rng).map(|c| c.len()), Ok(3));
    }
}
