// SPDX-License-Identifier: MIT

use taskbag::{default_worker_count, integrate, integrate_sequential};

fn main() -> taskbag::Result<()> {
    env_logger::init();

    let intervals = 10_000_000;

    // The quarter-circle kernel integrates to pi over [0, 1].
    let kernel = |x: f64| 4.0 / (1.0 + x * x);

    let estimate = integrate(kernel, 0.0, 1.0, intervals)?;
    let reference = integrate_sequential(kernel, 0.0, 1.0, intervals)?;

    println!("workers:    {}", default_worker_count());
    println!("intervals:  {}", intervals);
    println!("parallel:   {:.12}", estimate);
    println!("sequential: {:.12}", reference);
    println!("true value: {:.12}", std::f64::consts::PI);
    println!("error:      {:.3e}", (estimate - std::f64::consts::PI).abs());

    Ok(())
}
