// prompts.rs
use crate::domain::{PriceRange, PropertyType, TransactionMode};
use crate::errors::AppError;
use crate::remote::GeoEntry;
use std::io::{BufRead, Write};

/// Numbered-menu prompts over any line reader. Out-of-range or non-numeric
/// answers are reported and asked again; closed input is an error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the 0-based index of the chosen item.
    pub fn choose<T, F>(&mut self, label: &str, items: &[T], name: F) -> Result<usize, AppError>
    where
        F: Fn(&T) -> &str,
    {
        if items.is_empty() {
            return Err(AppError::InvalidSelection(format!("no options for {label}")));
        }

        writeln!(self.output, "{label}")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name(item))?;
        }

        loop {
            let answer = self.read_line("Enter the number of your choice: ")?;
            match parse_index(&answer, items.len()) {
                Ok(index) => return Ok(index),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    pub fn choose_entry<'a>(&mut self, label: &str, entries: &'a [GeoEntry]) -> Result<&'a GeoEntry, AppError> {
        let index = self.choose(label, entries, |e| e.name.as_str())?;
        Ok(&entries[index])
    }

    pub fn choose_mode(&mut self) -> Result<TransactionMode, AppError> {
        let modes = [(TransactionMode::Buying, "Comprar"), (TransactionMode::Rental, "Alquilar")];
        let index = self.choose("Select an option:", &modes, |(_, label)| *label)?;
        Ok(modes[index].0)
    }

    pub fn choose_property_type(&mut self) -> Result<PropertyType, AppError> {
        let types = PropertyType::ALL;
        let index = self.choose("Select the property type:", &types, |t| t.label())?;
        Ok(types[index])
    }

    /// Asks whether to filter by price, then for both bounds.
    pub fn ask_price_range(&mut self) -> Result<Option<PriceRange>, AppError> {
        let answers = ["Sí", "No"];
        let wants_range = self.choose("Set a price range?", &answers, |a| *a)? == 0;
        if !wants_range {
            return Ok(None);
        }

        let min = self.ask_amount("Minimum price: ")?;
        let max = self.ask_amount("Maximum price: ")?;
        Ok(Some(PriceRange::new(min, max)))
    }

    fn ask_amount(&mut self, prompt: &str) -> Result<u64, AppError> {
        loop {
            let answer = self.read_line(prompt)?;
            match answer.trim().parse::<u64>() {
                Ok(amount) => return Ok(amount),
                Err(_) => writeln!(self.output, "Invalid amount: '{}'", answer.trim())?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InvalidSelection("input closed".into()));
        }
        Ok(line.trim().to_string())
    }
}

/// Parses a 1-based menu answer into a 0-based index.
pub fn parse_index(answer: &str, len: usize) -> Result<usize, AppError> {
    let n: usize = answer
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidSelection(format!("'{}' is not a number", answer.trim())))?;

    if n == 0 || n > len {
        return Err(AppError::InvalidSelection(format!(
            "{n} is out of range, pick 1 to {len}"
        )));
    }
    Ok(n - 1)
}
