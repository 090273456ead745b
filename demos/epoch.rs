/// Walks one shuffled epoch over a digit dataset the way a training loop
/// would, and prints the mean pixel intensity per class.
///
/// Run with:
///   cargo run --example epoch --release -- path/to/mnist
///
/// The directory must hold the train-{images,labels} IDX files.

use std::collections::BTreeMap;

use ferrite_sn3::{Dataset, Sampler};

const BATCH_SIZE: usize = 64;

fn main() -> ferrite_sn3::Result<()> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| "data/mnist".to_owned());
    let ds = Dataset::new(&dir, true)?;
    println!("Loaded {} samples, image dims {:?}", ds.size(), ds.image_sample_dims());

    let sampler = Sampler::shuffled(ds.size(), &mut rand::thread_rng());

    // class -> (sum of per-image means, count)
    let mut per_class: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for (batch_idx, batch) in sampler.batches(BATCH_SIZE).enumerate() {
        for &i in batch {
            let (image, label) = ds.get(i)?;
            let pixels = image.as_slice::<f32>().unwrap_or(&[]);
            let mean = pixels.iter().map(|&p| p as f64).sum::<f64>() / pixels.len().max(1) as f64;
            let class = label.scalar_i64().unwrap_or(-1);
            let entry = per_class.entry(class).or_insert((0.0, 0));
            entry.0 += mean;
            entry.1 += 1;
        }
        if batch_idx % 200 == 0 {
            println!("  batch {:>5} / {}", batch_idx, (ds.size() + BATCH_SIZE - 1) / BATCH_SIZE);
        }
    }

    println!("\nclass  samples  mean intensity");
    for (class, (sum, count)) in &per_class {
        println!("{:>5}  {:>7}  {:.4}", class, count, sum / *count as f64);
    }
    Ok(())
}
