//! # Console I/O
//!
//! Prompts for product and rebate details and prints the outcome.
//!
//! Generic over the reader and writer, so tests drive it with in-memory
//! buffers. Invalid decimals and menu choices are re-asked; end of input
//! is an error.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rebate_core::{
    CalculateRebateResult, IncentiveType, Money, Product, Rate, Rebate, SupportedIncentives,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// Console error types.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Input ended before all values were entered")]
    InputClosed,
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Line-oriented prompt session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Consumes the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    // =========================================================================
    // Primitive Prompts
    // =========================================================================

    fn read_line(&mut self) -> ConsoleResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn write_prompt(&mut self, message: &str) -> ConsoleResult<()> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    /// Prints a line.
    pub fn say(&mut self, message: &str) -> ConsoleResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Prompts for free text. The answer is trimmed.
    pub fn prompt_text(&mut self, message: &str) -> ConsoleResult<String> {
        self.write_prompt(message)?;
        self.read_line()
    }

    /// Prompts until the answer parses as a decimal.
    pub fn prompt_decimal(&mut self, message: &str) -> ConsoleResult<Decimal> {
        loop {
            let answer = self.prompt_text(message)?;
            match Decimal::from_str(&answer) {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Invalid input. Please enter a valid decimal value.")?,
            }
        }
    }

    fn print_menu(&mut self, message: &str) -> ConsoleResult<()> {
        self.say(message)?;
        for (index, kind) in IncentiveType::KNOWN.iter().enumerate() {
            writeln!(self.output, "{}: {}", index, kind)?;
        }
        Ok(())
    }

    /// Prompts for one incentive kind by menu index.
    pub fn prompt_incentive(&mut self, message: &str) -> ConsoleResult<IncentiveType> {
        self.print_menu(message)?;
        loop {
            let answer = self.read_line()?;
            if let Some(kind) = menu_choice(&answer) {
                return Ok(kind);
            }
            self.say("Invalid input. Please enter a valid integer value.")?;
            self.write_prompt(message)?;
        }
    }

    /// Prompts for one or more incentive kinds, e.g. `0` or `0,2`.
    pub fn prompt_supported_incentives(
        &mut self,
        message: &str,
    ) -> ConsoleResult<SupportedIncentives> {
        self.print_menu(message)?;
        loop {
            let answer = self.read_line()?;
            let choices: Option<Vec<IncentiveType>> = answer.split(',').map(menu_choice).collect();
            if let Some(kinds) = choices {
                return Ok(kinds.into_iter().collect());
            }
            self.say("Invalid input. Please enter one or more menu numbers separated by commas.")?;
            self.write_prompt(message)?;
        }
    }

    // =========================================================================
    // Entity Prompts
    // =========================================================================

    /// Reads the product section.
    pub fn read_product(&mut self) -> ConsoleResult<Product> {
        self.say(" Product Info ")?;
        let identifier = self.prompt_text("Enter Identifier: ")?;
        let price = self.prompt_decimal("Enter Price: ")?;
        let uom = self.prompt_text("Enter UOM: ")?;
        let supported_incentives = self.prompt_supported_incentives("Select Supported Incentives:")?;

        Ok(Product {
            identifier,
            price: Money::new(price),
            uom,
            supported_incentives,
        })
    }

    /// Reads the rebate section.
    pub fn read_rebate(&mut self) -> ConsoleResult<Rebate> {
        self.say(" Rebate Info ")?;
        let identifier = self.prompt_text("Enter Identifier: ")?;
        let amount = self.prompt_decimal("Enter Amount: ")?;
        let incentive = self.prompt_incentive("Select an Incentive:")?;
        let percentage = self.prompt_decimal("Enter Rebate Percentage (fraction, e.g. 0.1): ")?;

        Ok(Rebate {
            identifier,
            incentive,
            amount: Money::new(amount),
            percentage: Rate::from_fraction(percentage),
        })
    }

    pub fn read_volume(&mut self) -> ConsoleResult<Decimal> {
        self.prompt_decimal("Enter Volume: ")
    }

    /// Prints the calculation outcome.
    pub fn report(&mut self, result: &CalculateRebateResult) -> ConsoleResult<()> {
        if result.success {
            writeln!(
                self.output,
                "Rebate calculation successful! Rebate Amount {}",
                result.rebate_amount
            )?;
        } else {
            writeln!(self.output, "Rebate calculation failed!")?;
        }
        self.output.flush()?;
        Ok(())
    }
}

/// Maps a menu index to its incentive kind.
fn menu_choice(answer: &str) -> Option<IncentiveType> {
    let index: usize = answer.trim().parse().ok()?;
    IncentiveType::KNOWN.get(index).copied()
}
