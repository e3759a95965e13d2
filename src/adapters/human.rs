//! Human player reading cell indices from a line-oriented input

use std::io::{self, BufRead, Write};

use crate::{Error, Oracle, Result, ports::Opponent, tictactoe::render_board};

/// Prompts on `output` and reads moves from `input`, one cell index (0-8)
/// per line. Invalid or occupied cells are reported and asked for again;
/// `q` or end of input ends the game with an `Interrupted` I/O error.
pub struct HumanOpponent<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanOpponent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn quit(reason: &str) -> Error {
        Error::Io {
            operation: "read move".to_string(),
            source: io::Error::new(io::ErrorKind::Interrupted, reason.to_string()),
        }
    }

    fn read_cell(&mut self) -> Result<Option<usize>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Self::quit("end of input"));
        }
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return Err(Self::quit("player quit"));
        }
        Ok(trimmed.parse().ok())
    }

    /// Ask a yes/no question. Anything but `y`/`yes`, including end of
    /// input, counts as no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}

impl<R: BufRead, W: Write> Opponent for HumanOpponent<R, W> {
    fn play(&mut self, oracle: &mut Oracle) -> Result<usize> {
        if oracle.context().is_over() {
            return Err(Error::GameOver);
        }
        loop {
            write!(
                self.output,
                "{}\n{} to move, cell (0-8, q to quit): ",
                render_board(oracle.state(), None),
                oracle.context().to_move().glyph()
            )?;
            self.output.flush()?;

            let Some(cell) = self.read_cell()? else {
                writeln!(self.output, "Not a number.")?;
                continue;
            };
            match oracle.notify_external_move(cell) {
                Ok(()) => return Ok(cell),
                Err(Error::InvalidMove { .. } | Error::InvalidPosition { .. }) => {
                    writeln!(self.output, "Cell {cell} is not available.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OracleConfig;

    #[test]
    fn reprompts_until_a_free_cell_is_given() {
        let mut oracle = Oracle::new(&OracleConfig::new());
        oracle.initialize().unwrap();
        oracle.notify_external_move(4).unwrap();

        let input = "abc\n4\n12\n0\n".as_bytes();
        let mut output = Vec::new();
        {
            let mut human = HumanOpponent::new("you", input, &mut output);
            assert_eq!(human.play(&mut oracle).unwrap(), 0);
        }

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Not a number."));
        assert!(transcript.contains("Cell 4 is not available."));
        assert!(transcript.contains("Cell 12 is not available."));
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut human = HumanOpponent::new("you", "Y\n\nyes\n".as_bytes(), io::sink());
        assert!(human.confirm("Again?").unwrap());
        assert!(!human.confirm("Again?").unwrap());
        assert!(human.confirm("Again?").unwrap());
        assert!(!human.confirm("Again?").unwrap());
    }

    #[test]
    fn end_of_input_stops_the_game() {
        let mut oracle = Oracle::new(&OracleConfig::new());
        oracle.initialize().unwrap();
        let mut human = HumanOpponent::new("you", "".as_bytes(), io::sink());
        assert!(matches!(human.play(&mut oracle), Err(Error::Io { .. })));
        assert_eq!(oracle.context().ply(), 0);
    }
}
