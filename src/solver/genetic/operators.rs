use rand::Rng;

const FREE: usize = usize::MAX;

/// Order crossover (OX) restricted to the interior of two equal-length
/// routes, so the fixed pickup/delivery endpoints never move. The
/// parent-1 segment is copied in place, then the remaining interior
/// slots are filled, in order, with parent-2 genes not already present.
/// Parents built from different hub subsets can leave holes; those are
/// backfilled from parent 1, whose interior always carries enough genes.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let len = parent1.len();
    if len < 4 {
        // fewer than two interior positions: nothing to recombine
        return parent1.to_vec();
    }

    // interior cut points: 1 <= cut_start < cut_end < len - 1
    let cut_start = rng.gen_range(1..len - 2);
    let cut_end = rng.gen_range(cut_start + 1..len - 1);

    let mut child = vec![FREE; len];
    child[cut_start..=cut_end].copy_from_slice(&parent1[cut_start..=cut_end]);

    fill_free_slots(&mut child, &parent2[1..len - 1]);
    fill_free_slots(&mut child, &parent1[1..len - 1]);

    child[0] = parent1[0];
    child[len - 1] = parent1[len - 1];
    child
}

/// Write `genes` not yet present in `child` into its free interior
/// slots, first free slot first. Plain index bookkeeping over the fixed
/// buffer; the endpoints at positions 0 and len-1 are never written.
fn fill_free_slots(child: &mut [usize], genes: &[usize]) {
    let len = child.len();
    let mut cursor = 1;

    for &gene in genes {
        if child.contains(&gene) {
            continue;
        }
        while cursor < len - 1 && child[cursor] != FREE {
            cursor += 1;
        }
        if cursor >= len - 1 {
            break;
        }
        child[cursor] = gene;
    }
}

/// With probability `mutation_rate`, swap two randomly chosen interior
/// positions. The endpoints are never touched.
pub fn swap_mutation<R: Rng>(stops: &mut [usize], mutation_rate: f64, rng: &mut R) {
    if stops.len() < 4 {
        return;
    }
    if rng.gen::<f64>() >= mutation_rate {
        return;
    }

    let i = rng.gen_range(1..stops.len() - 1);
    let j = rng.gen_range(1..stops.len() - 1);
    stops.swap(i, j);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn crossover_preserves_endpoints_length_and_uniqueness() {
        let parent1 = vec![0, 3, 1, 4, 2, 9];
        let parent2 = vec![0, 4, 2, 1, 3, 9];
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let child = order_crossover(&parent1, &parent2, &mut rng);

            assert_eq!(child.len(), parent1.len());
            assert_eq!(child[0], 0);
            assert_eq!(*child.last().unwrap(), 9);

            let mut sorted = child.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), child.len(), "duplicate gene in {child:?}");
            assert!(!child.contains(&FREE));
        }
    }

    #[test]
    fn crossover_with_disjoint_hub_subsets_backfills_from_parent1() {
        // same length, different intermediate subsets (budget-truncated)
        let parent1 = vec![0, 3, 1, 9];
        let parent2 = vec![0, 5, 6, 9];
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..100 {
            let child = order_crossover(&parent1, &parent2, &mut rng);
            assert_eq!(child.len(), 4);
            assert_eq!(child[0], 0);
            assert_eq!(child[3], 9);
            assert!(!child.contains(&FREE));
        }
    }

    #[test]
    fn short_routes_pass_through_crossover_unchanged() {
        let parent1 = vec![0, 2, 9];
        let parent2 = vec![0, 5, 9];
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(order_crossover(&parent1, &parent2, &mut rng), parent1);
    }

    #[test]
    fn mutation_never_moves_the_endpoints() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut stops = vec![0, 1, 2, 3, 9];

        for _ in 0..500 {
            swap_mutation(&mut stops, 1.0, &mut rng);
            assert_eq!(stops[0], 0);
            assert_eq!(*stops.last().unwrap(), 9);
        }
    }
}
