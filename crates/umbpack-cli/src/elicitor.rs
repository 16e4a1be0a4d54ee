//! Line-based prompting with defaults and validation retries
//!
//! Works over any `BufRead`/`Write` pair so the question flow can be driven
//! from a script in tests. End of input counts as an empty answer; a retry
//! loop that can no longer get a valid answer fails with
//! [`InitError::InputClosed`] instead of spinning forever.

use std::io::{BufRead, Write};

use umbpack_manifest::semver::Version;
use umbpack_manifest::{parse_version, Licence, LicenceRegistry, LicenceResolver};

use crate::errors::InitError;
use crate::logger;
use crate::messages::{self, fill};

pub struct Elicitor<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl<R: BufRead, W: Write> Elicitor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Elicitor {
            input,
            output,
            exhausted: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line of output
    pub fn say(&mut self, line: &str) -> Result<(), InitError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Ask for a value. A blank answer (or end of input) gives `default`
    /// unchanged; anything else is trimmed.
    pub fn ask(&mut self, prompt: &str, default: &str) -> Result<String, InitError> {
        write!(self.output, "{}: ", prompt)?;
        if !default.trim().is_empty() {
            write!(self.output, "({}) ", default)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.exhausted = true;
            // Keep the transcript readable when stdin is not a terminal
            writeln!(self.output)?;
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    /// Ask until a non-blank value is given
    pub fn ask_required(&mut self, prompt: &str, default: &str) -> Result<String, InitError> {
        loop {
            let answer = self.ask(prompt, default)?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
            self.say(&fill(messages::REQUIRED_VALUE, prompt))?;
            self.give_up_if_exhausted(prompt)?;
        }
    }

    /// Ask until the answer parses as a semantic version
    pub fn ask_version(&mut self, prompt: &str, default: &str) -> Result<Version, InitError> {
        loop {
            let answer = self.ask(prompt, default)?;
            match parse_version(&answer) {
                Ok(version) => return Ok(version),
                Err(e) => {
                    logger::debug(&e.to_string());
                    self.say(&fill(messages::INVALID_VERSION, &answer))?;
                    self.give_up_if_exhausted(prompt)?;
                }
            }
        }
    }

    /// Ask until the answer resolves to a known licence (or UNLICENSED)
    pub fn ask_licence<G: LicenceRegistry>(
        &mut self,
        prompt: &str,
        default: &str,
        resolver: &LicenceResolver<G>,
    ) -> Result<Licence, InitError> {
        loop {
            let answer = self.ask(prompt, default)?;

            logger::spinner_start(&fill(messages::LICENCE_LOOKUP, &answer));
            let resolution = resolver.resolve(&answer);
            logger::spinner_stop();

            if let Some(e) = &resolution.registry_error {
                logger::debug(&format!("Licence registry unavailable: {}", e));
                self.say(&fill(messages::REGISTRY_UNAVAILABLE, e))?;
            }

            match resolution.licence {
                Some(licence) => {
                    logger::debug(&format!("Licence {} -> {:?}", licence.name, licence.url));
                    return Ok(licence);
                }
                None => {
                    self.say(&fill(messages::INVALID_LICENCE, &answer))?;
                    self.give_up_if_exhausted(prompt)?;
                }
            }
        }
    }

    /// Yes/no question; anything starting with `y` or `Y` is a yes
    pub fn confirm(&mut self, prompt: &str, default: &str) -> Result<bool, InitError> {
        let answer = self.ask(prompt, default)?;
        Ok(answer
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&'y')))
    }

    fn give_up_if_exhausted(&self, prompt: &str) -> Result<(), InitError> {
        if self.exhausted {
            return Err(InitError::InputClosed(prompt.to_string()));
        }
        Ok(())
    }
}
