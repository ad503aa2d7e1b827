//! Size-sweep benchmark for the multiplication engines.
//!
//! For each shape in the sweep, builds two random operand tensors, times
//! the naive and optimized engines over a number of trials, cross-checks the
//! two products with the equivalence checker, and appends the results to a
//! plain-text log file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use rand::Rng;
use tm_tensor::{compare, MulEngine, NaiveEngine, OptimizedEngine, Tensor};

const LOG_PATH: &str = "tensor_multiply.log";
const TRIALS: usize = 1;
const ITERATIONS: usize = 1;
const EPSILON: f64 = 1e-6;

fn random_tensor(dims: &[usize]) -> Result<Tensor, tm_tensor::TensorError> {
    let mut rng = rand::thread_rng();
    let mut t = Tensor::zeros(dims)?;
    for idx in t.indices() {
        t.set(&idx, rng.gen_range(0..100) as f64)?;
    }
    Ok(t)
}

/// Times one engine over `TRIALS x ITERATIONS` fresh operand pairs and logs
/// the mean wall-clock seconds per multiplication.
fn time_engine(
    engine: &dyn MulEngine,
    dims: &[usize],
    log: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut total = 0.0f64;
    for _ in 0..ITERATIONS {
        for _ in 0..TRIALS {
            let a = random_tensor(dims)?;
            let b = random_tensor(dims)?;
            let start = Instant::now();
            let _c = engine.multiply(&a, &b)?;
            total += start.elapsed().as_secs_f64();
        }
    }
    let mean = total / (TRIALS * ITERATIONS) as f64;
    writeln!(log, "Average execution time: {mean} seconds")?;
    Ok(())
}

/// Multiplies one shared operand pair with both engines and logs whether
/// the products agree within the tolerance.
fn verify_parity(dims: &[usize], log: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let a = random_tensor(dims)?;
    let b = random_tensor(dims)?;
    let naive = NaiveEngine::new().multiply(&a, &b)?;
    let optimized = OptimizedEngine::new().multiply(&a, &b)?;
    let verdict = compare(&naive, &optimized, EPSILON);
    if verdict.equal {
        writeln!(log, "Engine parity: OK (epsilon {EPSILON})")?;
    } else if let Some(m) = verdict.first_mismatch {
        writeln!(
            log,
            "Engine parity: FAILED at {:?}: naive {} vs optimized {}",
            m.index, m.left, m.right
        )?;
    } else {
        writeln!(log, "Engine parity: FAILED (shape disagreement)")?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut log = BufWriter::new(File::create(LOG_PATH)?);

    // Square 2-D matrices plus one 4-D case. The N-D contraction doubles
    // the free axes, so the 4-D operand stays small to keep the result
    // tensor (8^6 elements here) in check.
    let sweep: Vec<Vec<usize>> = vec![
        vec![64, 64],
        vec![128, 128],
        vec![256, 256],
        vec![512, 512],
        vec![8, 8, 8, 8],
    ];

    for dims in &sweep {
        let shape = dims
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("x");
        writeln!(
            log,
            "Testing tensor size {shape} for {TRIALS} trials and {ITERATIONS} iterations:"
        )?;

        writeln!(log, "Testing naive multiplication:")?;
        time_engine(&NaiveEngine::new(), dims, &mut log)?;

        writeln!(log, "Testing optimized multiplication:")?;
        time_engine(&OptimizedEngine::new(), dims, &mut log)?;

        verify_parity(dims, &mut log)?;
        log.flush()?;
    }

    Ok(())
}
