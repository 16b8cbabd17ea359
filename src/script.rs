use crate::host::{Context, HostError};
use crate::message::MessageError;
use crate::running_average::RunningAverage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Values above this make the running-average script recommend cooling down.
pub const COOL_DOWN_THRESHOLD: f64 = 60.0;
pub const COOL_DOWN_ACTION: &str = "You should cool it down";

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Message error: {0}")]
    Message(#[from] MessageError),
    #[error("Host error: {0}")]
    Host(#[from] HostError),
    #[error("Stored count is not a non-negative integer: {0}")]
    InvalidCount(f64),
}

/// Logic run once per message on behalf of a profile.
pub trait Script: Send {
    fn name(&self) -> &'static str;

    fn eval(&self, ctx: &mut Context<'_>) -> Result<(), ScriptError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptKind {
    RunningAverage,
    Sum,
}

impl ScriptKind {
    pub fn build(&self) -> Box<dyn Script> {
        match self {
            ScriptKind::RunningAverage => Box::new(RunningAverageScript),
            ScriptKind::Sum => Box::new(SumScript),
        }
    }
}

/// Lifetime average of a temperature reading, with a cool-down hint.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunningAverageScript;

impl RunningAverageScript {
    fn stored_count(ctx: &Context<'_>) -> Result<u64, ScriptError> {
        let count = ctx.get("count", 0.0);
        if count < 0.0 || count.fract() != 0.0 || !count.is_finite() {
            return Err(ScriptError::InvalidCount(count));
        }
        Ok(count as u64)
    }
}

impl Script for RunningAverageScript {
    fn name(&self) -> &'static str {
        "running-average"
    }

    fn eval(&self, ctx: &mut Context<'_>) -> Result<(), ScriptError> {
        let value = ctx.message().value()?;
        let mut average = RunningAverage::from_parts(ctx.get("average", 0.0), Self::stored_count(ctx)?);
        average.add(value);

        ctx.set("average", average.value());
        ctx.set("current", value);
        ctx.set("count", average.count() as f64);

        ctx.title(format!(
            "The lifetime average of the CPU temperature is {:.2}C",
            average.value()
        ));
        ctx.description(format!("Its current temperature is {:.2}C", value));

        if value > COOL_DOWN_THRESHOLD {
            ctx.action(COOL_DOWN_ACTION);
        }
        Ok(())
    }
}

/// Sum of all values seen so far.
#[derive(Debug, Default, Clone, Copy)]
pub struct SumScript;

impl Script for SumScript {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn eval(&self, ctx: &mut Context<'_>) -> Result<(), ScriptError> {
        let sum = ctx.get("sum", 0.0) + ctx.message().value()?;
        ctx.set("sum", sum);
        ctx.display_named("title", format!("the sum is {}", sum))?;
        Ok(())
    }
}
