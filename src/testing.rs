use rand::{distributions::{Distribution, Uniform}, seq::SliceRandom, Rng};

pub fn init_test() {
	drop(env_logger::try_init());
}

/// `n` (index, key) pairs with indices `0..n` in shuffled order and keys drawn from `[-range, range]`
pub fn random_pairs(rng: &mut impl Rng, n: u32, range: i64) -> Vec<(u32, i64)> {
	let key_dist = Uniform::new_inclusive(-range, range);
	let mut indices: Vec<u32> = (0..n).collect();
	indices.shuffle(rng);
	indices.into_iter().map(|i|(i, key_dist.sample(&mut *rng))).collect()
}
