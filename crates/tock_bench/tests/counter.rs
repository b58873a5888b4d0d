//! End-to-end checks of the counter model through the testbench harness.

use tock_bench::counter_test::{build_bench, functional_phase, reset_phase, COUNT16_WIDTH};
use tock_bench::{find_case, registered_cases, run_case, run_counter, CounterPlan, Testbench};
use tock_config::{RandResetPolicy, TockConfig};
use tock_sim::{Counter, Model, SimContext};

fn reset_bench(config: &TockConfig) -> Testbench<Counter> {
    let mut tb = build_bench(config, COUNT16_WIDTH).unwrap();
    reset_phase(&mut tb, config.bench.reset_cycles).unwrap();
    tb.set("reset", 0).unwrap();
    tb
}

#[test]
fn count16_passes_through_registry() {
    let case = find_case("CounterTest.count16").unwrap();
    let result = run_case(&case, &TockConfig::default());
    assert!(result.passed, "{:?}", result.render());
    assert_eq!(result.checks, 16);
    assert!(result.mismatches.is_empty());
    assert!(result.error.is_none());
    assert_eq!(result.final_time, 52);
}

#[test]
fn every_step_matches_count_modulo_eight() {
    for i in 1..=16u64 {
        let mut tb = reset_bench(&TockConfig::default());
        tb.clock_steps(i as u32).unwrap();
        assert_eq!(tb.read("io_out").unwrap(), i % 8, "after {i} step(s)");
    }
}

#[test]
fn reset_clears_any_power_on_state() {
    for policy in [
        RandResetPolicy::Zeros,
        RandResetPolicy::Ones,
        RandResetPolicy::Random,
    ] {
        for seed in 0..8 {
            let mut config = TockConfig::default();
            config.sim.rand_reset = policy;
            config.sim.seed = seed;
            let tb = reset_bench(&config);
            assert_eq!(tb.read("io_out").unwrap(), 0, "{policy:?} seed {seed}");
        }
    }
}

#[test]
fn ones_power_on_starts_at_max() {
    let mut config = TockConfig::default();
    config.sim.rand_reset = RandResetPolicy::Ones;
    let tb = build_bench(&config, COUNT16_WIDTH).unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 7);
}

#[test]
fn unreset_counter_records_every_mismatch_and_keeps_going() {
    let mut config = TockConfig::default();
    config.sim.rand_reset = RandResetPolicy::Ones;
    let mut tb = build_bench(&config, COUNT16_WIDTH).unwrap();
    // starts at 7, so every step lags the expected count by one
    let trajectory = functional_phase(&mut tb, 16, COUNT16_WIDTH).unwrap();
    assert_eq!(trajectory.len(), 16);
    assert_eq!(trajectory[..3].to_vec(), vec![0, 1, 2]);
    let outcome = tb.finish().unwrap();
    assert!(!outcome.passed());
    assert_eq!(outcome.checks, 16);
    assert_eq!(outcome.mismatches.len(), 16);
    let first = &outcome.mismatches[0];
    assert_eq!((first.step, first.expected, first.actual), (1, 1, 0));
    let last = &outcome.mismatches[15];
    assert_eq!((last.step, last.expected, last.actual), (16, 0, 7));
}

#[test]
fn reset_clears_mid_count_state() {
    let mut tb = reset_bench(&TockConfig::default());
    tb.clock_steps(5).unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 5);
    reset_phase(&mut tb, 10).unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 0);
    // held longer than needed, still zero
    reset_phase(&mut tb, 25).unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 0);
}

#[test]
fn output_never_exceeds_seven() {
    let mut tb = reset_bench(&TockConfig::default());
    for _ in 0..100 {
        tb.clock_step().unwrap();
        assert!(tb.read("io_out").unwrap() <= 7);
    }
}

#[test]
fn end_to_end_scenario() {
    let mut tb = reset_bench(&TockConfig::default());
    assert_eq!(tb.read("io_out").unwrap(), 0);
    tb.clock_step().unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 1);
    tb.clock_steps(7).unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 0);
    tb.clock_steps(8).unwrap();
    assert_eq!(tb.read("io_out").unwrap(), 0);
    assert!(tb.finish().unwrap().passed());
}

#[test]
fn fresh_models_are_deterministic() {
    let config = TockConfig::default();
    let a = run_counter(&config, CounterPlan::COUNT16).unwrap();
    let b = run_counter(&config, CounterPlan::COUNT16).unwrap();
    assert_eq!(a.trajectory, b.trajectory);
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn seeded_random_power_on_is_reproducible() {
    let mut config = TockConfig::default();
    config.sim.rand_reset = RandResetPolicy::Random;
    config.sim.seed = 42;
    let a = build_bench(&config, COUNT16_WIDTH).unwrap();
    let b = build_bench(&config, COUNT16_WIDTH).unwrap();
    assert_eq!(a.read("io_out").unwrap(), b.read("io_out").unwrap());
}

#[test]
fn direct_model_drive_matches_testbench() {
    let mut ctx = SimContext::new();
    let mut dut = Counter::new(&mut ctx);
    dut.reset = 1;
    for _ in 0..10 {
        for level in 0..=1 {
            ctx.time_inc(1);
            dut.clock = level;
            dut.eval(&ctx).unwrap();
        }
    }
    dut.reset = 0;
    let mut observed = Vec::new();
    for _ in 0..16 {
        for level in 0..=1 {
            ctx.time_inc(1);
            dut.clock = level;
            dut.eval(&ctx).unwrap();
        }
        dut.eval(&ctx).unwrap();
        observed.push(u64::from(dut.io_out));
    }
    Model::finalize(&mut dut).unwrap();

    let run = run_counter(&TockConfig::default(), CounterPlan::COUNT16).unwrap();
    assert_eq!(observed, run.trajectory);
}

#[test]
fn registry_lists_counter_cases() {
    let names: Vec<String> = registered_cases().iter().map(|c| c.full_name()).collect();
    assert_eq!(names, vec!["CounterTest.count16", "CounterTest.configured"]);
}

#[test]
fn count16_always_makes_sixteen_checks() {
    let config =
        tock_config::load_config_from_str("[bench]\nreset_cycles = 1\nsteps = 3\n").unwrap();
    let count16 = run_case(&find_case("CounterTest.count16").unwrap(), &config);
    assert!(count16.passed);
    assert_eq!(count16.checks, 16);
    assert_eq!(count16.final_time, 52);

    let configured = run_case(&find_case("CounterTest.configured").unwrap(), &config);
    assert!(configured.passed);
    assert_eq!(configured.checks, 3);
}

#[cfg(feature = "waveform")]
mod tracing {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enabled_trace_writes_vcd() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wave.vcd");
        let mut config = TockConfig::default();
        config.trace.enabled = true;
        config.trace.path = path.to_string_lossy().into_owned();

        let run = run_counter(&config, CounterPlan::COUNT16).unwrap();
        assert!(run.outcome.passed());

        let vcd = std::fs::read_to_string(&path).unwrap();
        assert!(vcd.contains("$timescale 1ns $end"));
        assert!(vcd.contains("$scope module TOP $end"));
        assert!(vcd.contains("$scope module Counter $end"));
        assert!(vcd.contains("io_out"));
        assert!(vcd.contains("#52"));
    }

    #[test]
    fn shallow_trace_omits_nested_scopes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wave.vcd");
        let mut config = TockConfig::default();
        config.trace.enabled = true;
        config.trace.depth = 1;
        config.trace.path = path.to_string_lossy().into_owned();

        run_counter(&config, CounterPlan::COUNT16).unwrap();
        let vcd = std::fs::read_to_string(&path).unwrap();
        assert!(vcd.contains("io_out"));
        assert!(!vcd.contains("Counter"));
    }

    #[test]
    fn tracing_does_not_change_results() {
        let tmp = TempDir::new().unwrap();
        let mut traced = TockConfig::default();
        traced.trace.enabled = true;
        traced.trace.path = tmp.path().join("wave.vcd").to_string_lossy().into_owned();

        let with = run_counter(&traced, CounterPlan::COUNT16).unwrap();
        let without = run_counter(&TockConfig::default(), CounterPlan::COUNT16).unwrap();
        assert_eq!(with.trajectory, without.trajectory);
        assert_eq!(with.outcome, without.outcome);
    }

    #[test]
    fn unopenable_trace_fails_the_case() {
        let tmp = TempDir::new().unwrap();
        let mut config = TockConfig::default();
        config.trace.enabled = true;
        config.trace.path = tmp
            .path()
            .join("missing")
            .join("wave.vcd")
            .to_string_lossy()
            .into_owned();

        let case = find_case("CounterTest.count16").unwrap();
        let result = run_case(&case, &config);
        assert!(!result.passed);
        assert_eq!(result.checks, 0);
        let err = result.error.unwrap();
        assert!(err.contains("failed to open trace file"), "{err}");
    }
}
