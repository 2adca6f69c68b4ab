//! Interactive collection of alert settings.
//!
//! Values passed as flags are used as-is; every missing one is asked for on the
//! terminal. An invalid answer prints the reason and asks again. Closing stdin
//! aborts the flow.
use std::io::{BufRead, Write};

use quote_common::alert::{AlertConfig, Direction};
use quote_common::net::DEFAULT_INTERVAL_MS;
use quote_common::{QuoteError, Result, Symbol};

use crate::args::WatchArgs;

/// Line-oriented question/answer helper over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wrap an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `label` until `parse` accepts the trimmed answer.
    pub fn ask<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        loop {
            write!(self.output, "{}: ", label)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(QuoteError::Format(format!("input closed while asking for {}", label)));
            }
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(reason) => writeln!(self.output, "  {}", reason)?,
            }
        }
    }

    /// Fill in whatever `args` left out and validate the result.
    pub fn collect(&mut self, args: WatchArgs) -> Result<AlertConfig> {
        let symbol = match args.symbol {
            Some(symbol) => symbol,
            None => self.ask("Symbol (e.g. AAPL.US)", parse_symbol)?,
        };
        let target = match args.target {
            Some(target) => target,
            None => self.ask("Target price", parse_target)?,
        };
        let direction = match args.direction {
            Some(direction) => direction,
            None => self.ask("Direction (above/below)", parse_direction)?,
        };
        let interval_ms = match args.interval_ms {
            Some(interval_ms) => interval_ms,
            None => self.ask(
                &format!("Poll interval in ms [{}]", DEFAULT_INTERVAL_MS),
                parse_interval,
            )?,
        };

        Ok(AlertConfig::new(&symbol, target, direction, interval_ms)?)
    }
}

fn parse_symbol(answer: &str) -> std::result::Result<String, String> {
    Symbol::parse(answer)
        .map(String::from)
        .map_err(|err| err.to_string())
}

fn parse_target(answer: &str) -> std::result::Result<f64, String> {
    match answer.parse::<f64>() {
        Ok(value) if value > 0.0 => Ok(value),
        Ok(_) => Err("target price must be greater than zero".to_string()),
        Err(_) => Err(format!("{:?} is not a number", answer)),
    }
}

fn parse_direction(answer: &str) -> std::result::Result<Direction, String> {
    answer
        .parse::<Direction>()
        .map_err(|_| "answer \"above\" or \"below\"".to_string())
}

fn parse_interval(answer: &str) -> std::result::Result<i64, String> {
    if answer.is_empty() {
        return Ok(DEFAULT_INTERVAL_MS);
    }
    match answer.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        Ok(_) => Err("interval must be greater than zero".to_string()),
        Err(_) => Err(format!("{:?} is not a whole number of milliseconds", answer)),
    }
}
