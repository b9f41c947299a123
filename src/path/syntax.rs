use crate::errors::{Error, Result};

pub const COMMAND_CHARS: &str = "MmLlHhVvZzCcSsQqTtAa";

pub struct SvgPathSyntax {
    data: Vec<char>,
    index: usize,
}

impl SvgPathSyntax {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.chars().collect(),
            index: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Source text between `start` and the current position
    pub fn text_since(&self, start: usize) -> String {
        self.data[start.min(self.index)..self.index].iter().collect()
    }
}

impl PathSyntax for SvgPathSyntax {
    fn at_command(&self) -> bool {
        self.current().is_some_and(|c| COMMAND_CHARS.contains(c))
    }

    fn current(&self) -> Option<char> {
        self.data.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn at_end(&self) -> bool {
        self.index >= self.data.len()
    }
}

pub trait PathSyntax {
    fn at_command(&self) -> bool;
    fn current(&self) -> Option<char>;
    fn advance(&mut self);
    fn at_end(&self) -> bool;

    fn check_not_end(&self) -> Result<()> {
        if self.at_end() {
            Err(Error::Parse("ran out of data!".to_string()))
        } else {
            Ok(())
        }
    }

    fn skip_whitespace(&mut self) {
        // SVG definition of whitespace is 0x20, 0x9, 0xA, 0xD. Rust's is_ascii_whitespace()
        // also includes 0xC, but is close enough and convenient.
        while self.current().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn skip_wsp_comma(&mut self) {
        self.skip_whitespace();
        if self.current() == Some(',') {
            self.advance();
            self.skip_whitespace();
        }
    }

    /// Consume at least one character, then any following characters which
    /// cannot start a number, a separator or a command.
    fn skip_invalid(&mut self) {
        if self.at_end() {
            return;
        }
        self.advance();
        while let Some(c) = self.current() {
            if c.is_ascii_whitespace()
                || c.is_ascii_digit()
                || matches!(c, ',' | '.' | '+' | '-')
                || COMMAND_CHARS.contains(c)
            {
                break;
            }
            self.advance();
        }
        self.skip_wsp_comma();
    }

    fn read_flag(&mut self) -> Result<bool> {
        self.check_not_end()?;
        // per the grammar for `a`/`A`, could have '00' etc for
        // the two adjacent flags...
        let res = match self.current() {
            Some('0') => false,
            Some('1') => true,
            other => {
                return Err(Error::InvalidValue(
                    "flag".to_string(),
                    other.map(String::from).unwrap_or_default(),
                ))
            }
        };
        self.advance();
        self.skip_wsp_comma();
        Ok(res)
    }

    fn read_number(&mut self) -> Result<f64> {
        self.check_not_end()?;
        let mut mult = 1.;
        match self.current() {
            Some('-') => {
                mult = -1.;
                self.advance();
            }
            Some('+') => {
                self.advance();
            }
            _ => {}
        };
        Ok(mult * self.read_non_negative()?)
    }

    fn read_non_negative(&mut self) -> Result<f64> {
        self.check_not_end()?;
        let mut s = String::new();
        let mut dot_valid = true;
        let mut exp_valid = true;
        while let Some(ch) = self.current() {
            match ch {
                '0'..='9' => {
                    s.push(ch);
                    self.advance();
                }
                '.' if dot_valid => {
                    s.push(ch);
                    self.advance();
                    dot_valid = false;
                }
                'e' | 'E' if exp_valid && s.ends_with(|c: char| c.is_ascii_digit()) => {
                    s.push(ch);
                    self.advance();
                    // include sign character if present
                    if let Some(sign @ ('-' | '+')) = self.current() {
                        s.push(sign);
                        self.advance();
                    }
                    exp_valid = false;
                    dot_valid = false;
                }
                _ => break,
            }
        }
        self.skip_wsp_comma();
        s.parse()
            .map_err(|_| Error::InvalidValue("number".to_string(), s))
    }

    fn read_command(&mut self) -> Result<char> {
        match self.current() {
            Some(command) if self.at_command() => {
                self.advance();
                self.skip_whitespace();
                Ok(command)
            }
            other => Err(Error::InvalidValue(
                "path command".to_string(),
                other.map(String::from).unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ps_number() {
        let mut ps = SvgPathSyntax::new("123 4.5  -9.25");
        ps.skip_whitespace();
        assert_eq!(ps.read_number().unwrap(), 123.);
        assert_eq!(ps.read_number().unwrap(), 4.5);
        assert_eq!(ps.read_number().unwrap(), -9.25);

        // should read as little as needed to allow valid parsing,
        // so numbers can be squished together providing the result
        // is unambiguous. See https://www.w3.org/TR/SVG11/paths.html#PathDataBNF
        let mut ps = SvgPathSyntax::new("123-4.5.25+5");
        assert_eq!(ps.read_number().unwrap(), 123.);
        assert_eq!(ps.read_number().unwrap(), -4.5);
        assert_eq!(ps.read_number().unwrap(), 0.25);
        assert_eq!(ps.read_number().unwrap(), 5.);
    }

    #[test]
    fn test_ps_exponent() {
        let mut ps = SvgPathSyntax::new("1e3 -2E-2 +3.5e+2");
        assert_eq!(ps.read_number().unwrap(), 1e3);
        assert_eq!(ps.read_number().unwrap(), -2e-2);
        assert_eq!(ps.read_number().unwrap(), 3.5e+2);
        // '1e3.5' is '1e3' followed by '.5'
        let mut ps = SvgPathSyntax::new("1e3.5");
        assert_eq!(ps.read_number().unwrap(), 1e3);
        assert_eq!(ps.read_number().unwrap(), 0.5);
    }

    #[test]
    fn test_ps_flag() {
        let mut ps = SvgPathSyntax::new("0 1,1 0");
        assert!(!ps.read_flag().unwrap());
        assert!(ps.read_flag().unwrap());
        assert!(ps.read_flag().unwrap());
        assert!(!ps.read_flag().unwrap());

        // whitespace is not required around flags
        let mut ps = SvgPathSyntax::new("01");
        assert!(!ps.read_flag().unwrap());
        assert!(ps.read_flag().unwrap());

        let mut ps = SvgPathSyntax::new("2");
        assert!(ps.read_flag().is_err());
    }

    #[test]
    fn test_ps_number_pair() {
        let mut ps = SvgPathSyntax::new("123 ,   456");
        assert_eq!(ps.read_number().unwrap(), 123.);
        assert_eq!(ps.read_number().unwrap(), 456.);

        // 'for the string "M 0.6.5" … the first coordinate will be "0.6" and
        // the second coordinate will be ".5".'
        let mut ps = SvgPathSyntax::new("0.6.5");
        assert_eq!(ps.read_number().unwrap(), 0.6);
        assert_eq!(ps.read_number().unwrap(), 0.5);
    }

    #[test]
    fn test_ps_invalid() {
        let mut ps = SvgPathSyntax::new("#x! 12");
        assert!(ps.read_number().is_err());
        ps.skip_invalid();
        assert_eq!(ps.read_number().unwrap(), 12.);
    }
}
