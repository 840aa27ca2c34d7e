//! Random Subsampling

use crate::dataset::{Dataset, Subject};
use rand::Rng;
use rand::seq::index;

/// Draw `n` distinct subjects uniformly at random
///
/// Returns `min(n, df.len())` subjects; asking for more than the dataset
/// holds yields the whole dataset in random order. The caller supplies the
/// random source, so seeding it makes the draw reproducible.
pub fn sample<R: Rng + ?Sized>(df: &Dataset, n: usize, rng: &mut R) -> Dataset {
    let amount = n.min(df.len());
    if amount < n {
        tracing::debug!(
            requested = n,
            available = df.len(),
            "sample size exceeds dataset, returning every subject"
        );
    }

    let subjects: Vec<Subject> = index::sample(rng, df.len(), amount)
        .into_iter()
        .map(|i| df.subjects()[i].clone())
        .collect();

    df.with_subjects(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SchemaConfig, from_reader};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn dataset(rows: usize) -> Dataset {
        let mut table = String::from("FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd\n");
        for i in 0..rows {
            table.push_str(&format!("s{i},10,0.1,{}\n", i as f64));
        }
        from_reader(table.as_bytes(), &SchemaConfig::default()).unwrap()
    }

    #[test]
    fn test_sample_size_and_uniqueness() {
        let df = dataset(50);
        let mut rng = StdRng::seed_from_u64(7);

        for n in [0, 1, 10, 50] {
            let sampled = sample(&df, n, &mut rng);
            assert_eq!(sampled.len(), n);
            let rows: HashSet<usize> = sampled.iter().map(|s| s.row).collect();
            assert_eq!(rows.len(), n);
        }
    }

    #[test]
    fn test_sample_larger_than_dataset_returns_everything() {
        let df = dataset(5);
        let mut rng = StdRng::seed_from_u64(1);

        let sampled = sample(&df, 100, &mut rng);
        assert_eq!(sampled.len(), 5);
        let rows: HashSet<usize> = sampled.iter().map(|s| s.row).collect();
        assert_eq!(rows, (0..5).collect());
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let df = dataset(30);
        let a = sample(&df, 10, &mut StdRng::seed_from_u64(42));
        let b = sample(&df, 10, &mut StdRng::seed_from_u64(42));

        let ids_a: Vec<_> = a.iter().map(|s| s.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
    }
}
