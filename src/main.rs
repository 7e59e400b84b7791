use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use signal_hook::consts::SIGINT;
use signal_hook::consts::SIGTERM;

use termlife::config::Config;
use termlife::controller::Simulation;
use termlife::term::Terminal;
use termlife::term::TerminalKeys;

fn main() -> anyhow::Result<()> {
    // a bad rule exits here, before the terminal is touched
    let config = Config::from_env();
    config.init_logging()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))
            .context("Failed to register signal handler")?;
    }

    let mut simulation = Simulation::new(config.rules, rand::rng());

    let res = {
        let mut terminal = Terminal::enter().context("Failed to set up the terminal")?;
        simulation.run(&mut terminal, &mut TerminalKeys, &shutdown)
    };

    res.context("Terminal I/O failed")
}
