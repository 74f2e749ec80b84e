use std::io::Write;

use rmx_core::chain::ChainDispatcher;
use rmx_core::config::Config;
use rmx_core::output::LatchOutput;
use rmx_core::random::Lcg;
use rmx_types::{ChainSeed, ChannelMode, ClockLine};

#[test]
fn test_config_file_builds_running_chain() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[chain]
seed = true
random_seed = 7

[[channel]]
mode = "Copy (p)"

[[channel]]
mode = "Bernoul (p)"

[[channel]]
mode = "ClkDiv"
division = 1
"#
    )
    .unwrap();

    let config = Config::load_from(file.path()).unwrap();
    let chain_cfg = config.chain_config();
    assert_eq!(chain_cfg.seed, ChainSeed::High);
    assert_eq!(chain_cfg.channels[2].mode, ChannelMode::ClockDiv);

    let mut chain = ChainDispatcher::from_config(
        &chain_cfg,
        |_| LatchOutput::new(),
        Lcg::new(config.random_seed()),
    );
    chain.on_rising_edge(ClockLine::A);
    assert_eq!(chain.outputs(), vec![true, false, false]);
    chain.on_falling_edge(ClockLine::A);
    chain.on_rising_edge(ClockLine::A);
    assert_eq!(chain.outputs(), vec![true, false, true]);
}
