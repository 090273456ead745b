use rand::seq::SliceRandom;
use rand::Rng;

/// An ordering of sample indices for one pass over a dataset.
///
/// Pair with `Dataset::get` to walk the data in mini-batches:
/// ```ignore
/// let sampler = Sampler::shuffled(ds.size(), &mut rand::thread_rng());
/// for batch in sampler.batches(32) {
///     for &i in batch {
///         let (image, label) = ds.get(i)?;
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampler {
    order: Vec<usize>,
}

impl Sampler {
    /// `0, 1, ..., len - 1`.
    pub fn sequential(len: usize) -> Sampler {
        Sampler { order: (0..len).collect() }
    }

    /// A fresh random permutation of `0..len`.
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Sampler {
        let mut sampler = Sampler::sequential(len);
        sampler.order.shuffle(rng);
        sampler
    }

    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consecutive chunks of at most `batch_size` indices; the last one may
    /// be short. A `batch_size` of 0 yields nothing.
    pub fn batches(&self, batch_size: usize) -> std::slice::Chunks<'_, usize> {
        if batch_size == 0 {
            return self.order[..0].chunks(1);
        }
        self.order.chunks(batch_size)
    }
}
