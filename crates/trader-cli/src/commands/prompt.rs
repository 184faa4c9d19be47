//! 대화형 입력.

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// 줄 단위 프롬프트.
///
/// 입출력 스트림을 주입받으므로 테스트에서는 `Cursor`와 `Vec<u8>`을 사용합니다.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 비어 있지 않은 한 줄을 입력받습니다.
    pub fn text(&mut self, label: &str) -> Result<String> {
        loop {
            let line = self.read_line(label)?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }

    /// 숫자를 입력받습니다. 잘못된 값이면 다시 묻습니다.
    pub fn decimal(&mut self, label: &str) -> Result<Decimal> {
        loop {
            let line = self.read_line(label)?;
            match Decimal::from_str(&line) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Error: '{}' is not a valid number.", line)?,
            }
        }
    }

    fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for '{}'", label);
        }
        Ok(line.trim().to_string())
    }

    /// 출력 스트림 반환.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    #[test]
    fn test_text_skips_blank_lines() {
        let mut prompter = Prompter::new(Cursor::new("\n  \nBTCUSDT\n"), Vec::new());
        assert_eq!(prompter.text("Symbol").unwrap(), "BTCUSDT");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("Symbol: ").count(), 3);
    }

    #[test]
    fn test_decimal_reprompts_on_invalid() {
        let mut prompter = Prompter::new(Cursor::new("abc\n0.5\n"), Vec::new());
        assert_eq!(prompter.decimal("Quantity").unwrap(), dec!(0.5));

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("'abc' is not a valid number"));
    }

    #[test]
    fn test_eof_is_error() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let err = prompter.text("Symbol").unwrap_err();
        assert!(err.to_string().contains("Symbol"));
    }
}
