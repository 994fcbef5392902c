use std::io::Cursor;
use crate::cache::Outcome;
use crate::config::CacheParams;
use crate::error::SimError;
use crate::simulator::Simulator;
use crate::stats::{StatsCollector, Summary};
use crate::trace::{Operation, TraceRecord};

const YI: &str = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";

fn simulator(s: i64, e: i64, b: i64) -> Simulator {
    Simulator::new(&CacheParams::new(s, e, b).unwrap()).unwrap()
}

fn simulate(s: i64, e: i64, b: i64, trace: &str) -> Summary {
    simulator(s, e, b).simulate(Cursor::new(trace)).unwrap()
}

fn verbose(s: i64, e: i64, b: i64, trace: &str) -> String {
    let mut out = Vec::new();
    simulator(s, e, b).simulate_verbose(Cursor::new(trace), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn summary(hits: u64, misses: u64, evictions: u64) -> Summary {
    Summary { hits, misses, evictions }
}

#[test]
fn single_set_repeat_hits() {
    assert_eq!(simulate(0, 1, 0, " L 0,1\n L 0,1\n"), summary(1, 1, 0));
}

#[test]
fn single_set_collision_evicts() {
    assert_eq!(simulate(0, 1, 0, " L 0,1\n L 1,1\n L 0,1\n"), summary(0, 3, 2));
}

#[test]
fn two_sets_two_ways_fill_without_eviction() {
    assert_eq!(simulate(1, 2, 0, " L 0,1\n L 1,1\n L 2,1\n L 3,1\n"), summary(0, 4, 0));
}

#[test]
fn instructions_are_ignored() {
    assert_eq!(simulate(0, 1, 0, "I  10,4\nI  20,4\n"), summary(0, 0, 0));
    assert_eq!(simulate(0, 1, 0, " L 0,1\nI  1,4\n L 0,1\n"), summary(1, 1, 0));
}

#[test]
fn modify_is_a_miss_then_a_hit() {
    assert_eq!(simulate(0, 1, 0, " M 0,1\n"), summary(1, 1, 0));
    assert_eq!(simulate(0, 1, 0, " L 1,1\n M 0,1\n"), summary(1, 2, 1));
}

#[test]
fn yi_trace() {
    assert_eq!(simulate(4, 1, 4, YI), summary(4, 5, 3));
    assert_eq!(simulate(4, 2, 4, YI), summary(4, 5, 2));
}

#[test]
fn verbose_reports_each_access() {
    let expected = "L 10,1 miss\n\
                    M 20,1 miss hit\n\
                    L 22,1 hit\n\
                    S 18,1 hit\n\
                    L 110,1 miss eviction\n\
                    L 210,1 miss eviction\n\
                    M 12,1 miss eviction hit\n";
    assert_eq!(verbose(4, 1, 4, YI), expected);
}

#[test]
fn verbose_lists_instructions_without_outcomes() {
    assert_eq!(verbose(0, 1, 0, "I  400,4\n L 0,1\n"), "I 400,4\nL 0,1 miss\n");
}

#[test]
fn verbose_and_quiet_runs_agree() {
    let mut out = Vec::new();
    let loud = simulator(2, 2, 3).simulate_verbose(Cursor::new(YI), &mut out).unwrap();
    assert_eq!(loud, simulate(2, 2, 3, YI));
}

#[test]
fn step_reports_outcomes_in_order() {
    let mut simulator = simulator(0, 1, 0);
    let mut outcomes = Vec::new();
    let record = TraceRecord { operation: Operation::Modify, address: 4, size: 1 };
    simulator.step(&record, |outcome| outcomes.push(outcome));
    assert_eq!(outcomes, vec![Outcome::MissNoEviction, Outcome::Hit]);
    assert_eq!(simulator.summary(), Some(summary(1, 1, 0)));
}

#[test]
fn repeated_runs_accumulate_and_keep_the_cache_warm() {
    let mut simulator = simulator(0, 1, 0);
    assert_eq!(simulator.simulate(Cursor::new(" L 0,1\n")).unwrap(), summary(0, 1, 0));
    assert_eq!(simulator.simulate(Cursor::new(" L 0,1\n")).unwrap(), summary(1, 1, 0));
    assert_eq!(simulator.get_uninitialised_line_count(), 0);
}

#[test]
fn simulations_are_independent() {
    let mut first = simulator(0, 1, 0);
    let mut second = simulator(0, 1, 0);
    first.simulate(Cursor::new(" L 0,1\n L 0,1\n")).unwrap();
    assert_eq!(second.simulate(Cursor::new(" L 0,1\n")).unwrap(), summary(0, 1, 0));
    assert_eq!(first.summary(), Some(summary(1, 1, 0)));
    assert_eq!(second.cache().time(), 1);
}

#[test]
fn malformed_record_aborts() {
    let mut simulator = simulator(0, 1, 0);
    let result = simulator.simulate(Cursor::new(" L 0,1\n Z 0,1\n L 0,1\n"));
    assert!(matches!(result, Err(SimError::MalformedRecord { line: 2, .. })));
}

#[test]
fn failed_run_withholds_partial_totals() {
    let mut simulator = simulator(0, 1, 0);
    let result = simulator.simulate(Cursor::new(" L 0,1
 L 0,1
 L 0;1
"));
    assert!(matches!(result, Err(SimError::MalformedRecord { line: 3, .. })));
    assert_eq!(simulator.summary(), None);
    assert!(matches!(simulator.simulate(Cursor::new(" L 0,1
")), Err(SimError::Aborted)));
}

#[test]
fn invalid_utf8_is_a_malformed_record() {
    let mut simulator = simulator(0, 1, 0);
    let result = simulator.simulate(Cursor::new(&b" L 0,1\n L \xff0,1\n"[..]));
    assert!(matches!(result, Err(SimError::MalformedRecord { line: 2, .. })));
}

#[test]
fn empty_trace_produces_zeroes() {
    assert_eq!(simulate(3, 2, 1, ""), Summary::default());
}

#[test]
fn stats_collector_counts_evictions_as_misses() {
    let mut stats = StatsCollector::new();
    for outcome in [Outcome::Hit, Outcome::MissNoEviction, Outcome::MissWithEviction, Outcome::Hit] {
        stats.record(outcome);
    }
    let totals = stats.summary();
    assert_eq!(totals, summary(2, 2, 1));
    assert_eq!(totals.accesses(), 4);
    assert_eq!(totals.to_string(), "hits:2 misses:2 evictions:1");
}

#[test]
fn summary_serialises_as_json() {
    let json = serde_json::to_string(&summary(4, 5, 2)).unwrap();
    assert_eq!(json, r#"{"hits":4,"misses":5,"evictions":2}"#);
}
