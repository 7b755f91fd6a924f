/// Derives the name of a design attempt from its sampled parameters.
///
/// Pure and deterministic; the name is the join key for every persisted
/// artifact of the attempt and for the duplicate guard, so both length and
/// seed are embedded.
pub fn design_name(prefix: &str, length: u32, seed: u64) -> String {
    format!("{}_l{}_s{}", prefix, length, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_give_identical_names() {
        assert_eq!(design_name("binder", 64, 1234), design_name("binder", 64, 1234));
        assert_eq!(design_name("binder", 64, 1234), "binder_l64_s1234");
    }

    #[test]
    fn distinct_lengths_give_distinct_names() {
        for length in 1..200 {
            assert_ne!(
                design_name("binder", length, 42),
                design_name("binder", length + 1, 42)
            );
        }
    }

    #[test]
    fn distinct_seeds_give_distinct_names() {
        assert_ne!(design_name("binder", 64, 1), design_name("binder", 64, 2));
    }
}
