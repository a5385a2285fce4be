//! Set command implementation
//!
//! Applies one validated duty-cycle write through the write coordinator.

use crate::cli::args::{OutputFormat, SetArgs};
use crate::cli::output::{print_output, Message};
use crate::commands::build_executor;
use crate::config::Config;
use crate::domain::{DutyCycle, WriteTarget};
use crate::error::Result;
use crate::liquidctl::LiquidctlExecutor;
use crate::plugin::WriteCoordinator;

use std::sync::{Arc, Mutex};

/// Execute the set command
pub fn run_set(
    args: &SetArgs,
    config: &Config,
    exe: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let duty = DutyCycle::new(args.duty)?;
    let target = WriteTarget {
        address: args.address.clone(),
        channel: args.channel.clone(),
    };

    let executor: Arc<dyn LiquidctlExecutor> = Arc::new(build_executor(config, exe));
    let coordinator = WriteCoordinator::new(executor, Arc::new(Mutex::new(())));
    coordinator.apply(&target, duty)?;

    print_output(
        &Message::new(format!(
            "Set {} {} to {}",
            args.address, args.channel, duty
        )),
        format,
    )?;
    Ok(())
}
