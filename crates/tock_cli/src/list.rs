//! `tock list`: print the registered test case names.

use crate::GlobalArgs;

/// Prints one full case name per line on stdout.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cases = tock_bench::registered_cases();
    for case in &cases {
        println!("{}", case.full_name());
    }
    if !global.quiet {
        eprintln!("   {} test case(s)", cases.len());
    }
    Ok(0)
}
