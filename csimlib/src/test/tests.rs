use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use crate::config::CacheConfig;
use crate::io::open_trace;
use crate::simulator::Simulator;
use crate::stats::Summary;
use crate::util::get_configs;

#[test]
fn run_all_examples() -> Result<(), Box<dyn Error>> {
    let cases = get_configs()?;
    assert!(!cases.is_empty());
    for test in cases {
        println!("Running test for {}", test.output.display());
        // Read expected output
        let expected_output_file = File::open(&test.output)?;
        let expected_output: Summary = serde_json::from_reader(BufReader::new(expected_output_file))?;
        // Simulate!
        let params = CacheConfig::from_file(&test.config)?.to_params()?;
        let mut simulator = Simulator::new(&params)?;
        let result = simulator.simulate(open_trace(&test.trace)?)?;
        assert_eq!(result, expected_output, "{}", test.output.display());
        // Check results
        let time = simulator.get_execution_time();
        println!("Success for {}, time: {}", test.output.display(), time.as_nanos() as f64 / 1e9);
    }
    Ok(())
}

#[test]
fn every_example_config_and_trace_exists() -> Result<(), Box<dyn Error>> {
    for test in get_configs()? {
        assert!(test.config.is_file(), "{}", test.config.display());
        assert!(test.trace.is_file(), "{}", test.trace.display());
    }
    Ok(())
}
