use super::syntax::{PathSyntax, SvgPathSyntax};
use crate::errors::{Error, Result};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    Horizontal,
    Vertical,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    Close,
}

impl CommandKind {
    /// Command kind and whether it is relative, from a command letter
    pub fn from_char(c: char) -> Option<(Self, bool)> {
        let kind = match c.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::Horizontal,
            'V' => Self::Vertical,
            'C' => Self::CubicTo,
            'S' => Self::SmoothCubicTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::ArcTo,
            'Z' => Self::Close,
            _ => return None,
        };
        Some((kind, c.is_ascii_lowercase()))
    }

    /// Number of values in one argument group
    pub const fn arity(&self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => 2,
            Self::Horizontal | Self::Vertical => 1,
            Self::CubicTo => 6,
            Self::SmoothCubicTo | Self::QuadTo => 4,
            Self::ArcTo => 7,
            Self::Close => 0,
        }
    }

    pub fn letter(&self, relative: bool) -> char {
        let c = match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::Horizontal => 'H',
            Self::Vertical => 'V',
            Self::CubicTo => 'C',
            Self::SmoothCubicTo => 'S',
            Self::QuadTo => 'Q',
            Self::SmoothQuadTo => 'T',
            Self::ArcTo => 'A',
            Self::Close => 'Z',
        };
        if relative {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    Horizontal(f64),
    Vertical(f64),
    CubicTo {
        c1: Point,
        c2: Point,
        to: Point,
    },
    SmoothCubicTo {
        c2: Point,
        to: Point,
    },
    QuadTo {
        c: Point,
        to: Point,
    },
    SmoothQuadTo(Point),
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// A single application of a path command with its arguments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCommand {
    pub segment: Segment,
    pub relative: bool,
}

impl PathCommand {
    /// Build a command from exactly one group of argument values.
    pub fn from_values(kind: CommandKind, relative: bool, v: &[f64]) -> Result<Self> {
        if v.len() != kind.arity() {
            return Err(Error::Arity {
                command: kind.letter(relative),
                expected: kind.arity(),
                found: v.len(),
            });
        }
        let p = |i: usize| Point::new(v[i], v[i + 1]);
        let segment = match kind {
            CommandKind::MoveTo => Segment::MoveTo(p(0)),
            CommandKind::LineTo => Segment::LineTo(p(0)),
            CommandKind::Horizontal => Segment::Horizontal(v[0]),
            CommandKind::Vertical => Segment::Vertical(v[0]),
            CommandKind::CubicTo => Segment::CubicTo {
                c1: p(0),
                c2: p(2),
                to: p(4),
            },
            CommandKind::SmoothCubicTo => Segment::SmoothCubicTo { c2: p(0), to: p(2) },
            CommandKind::QuadTo => Segment::QuadTo { c: p(0), to: p(2) },
            CommandKind::SmoothQuadTo => Segment::SmoothQuadTo(p(0)),
            CommandKind::ArcTo => Segment::ArcTo {
                rx: v[0].abs(),
                ry: v[1].abs(),
                rotation: v[2],
                large_arc: v[3] != 0.,
                sweep: v[4] != 0.,
                to: p(5),
            },
            CommandKind::Close => Segment::Close,
        };
        Ok(Self { segment, relative })
    }
}

/// Tokenized path data: the commands that can be applied, and the argument
/// groups which were rejected.
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<PathCommand>,
    pub rejected: Vec<Error>,
}

enum Arg {
    Value(f64),
    Invalid(String),
}

fn read_arg(tokens: &mut SvgPathSyntax, flag: bool) -> Arg {
    let start = tokens.position();
    let value = if flag {
        tokens.read_flag().map(|f| if f { 1. } else { 0. })
    } else {
        tokens.read_number()
    };
    match value {
        Ok(v) if v.is_finite() => Arg::Value(v),
        _ => {
            if tokens.position() == start {
                tokens.skip_invalid();
            }
            Arg::Invalid(tokens.text_since(start).trim().to_string())
        }
    }
}

/// Split path data into commands.
///
/// Fails only if the data does not start with a command letter. Argument
/// groups containing non-numeric values, or left incomplete, are recorded in
/// `rejected` and parsing continues with the next group.
pub fn tokenize(data: &str) -> Result<CommandList> {
    let mut tokens = SvgPathSyntax::new(data);
    let mut list = CommandList::default();

    tokens.skip_whitespace();
    if tokens.at_end() {
        return Ok(list);
    }
    if !tokens.at_command() {
        return Err(Error::Parse(format!(
            "path data must begin with a command, found '{}'",
            tokens.current().unwrap_or_default()
        )));
    }

    while !tokens.at_end() {
        let letter = tokens.read_command()?;
        let Some((kind, relative)) = CommandKind::from_char(letter) else {
            return Err(Error::InvalidValue("path command".into(), letter.into()));
        };

        let mut args = vec![];
        while !tokens.at_end() && !tokens.at_command() {
            // arc flags are single characters and may be packed, e.g. `a5 5 0 0110 10`
            let flag = kind == CommandKind::ArcTo && matches!(args.len() % 7, 3 | 4);
            args.push(read_arg(&mut tokens, flag));
        }

        let arity = kind.arity();
        if arity == 0 {
            if !args.is_empty() {
                list.rejected.push(Error::Arity {
                    command: letter,
                    expected: 0,
                    found: args.len(),
                });
            }
            list.commands.push(PathCommand {
                segment: Segment::Close,
                relative,
            });
            continue;
        }
        if args.is_empty() {
            list.rejected.push(Error::Arity {
                command: letter,
                expected: arity,
                found: 0,
            });
            continue;
        }

        for (idx, group) in args.chunks(arity).enumerate() {
            // "If a moveto is followed by multiple pairs of coordinates,
            // the subsequent pairs are treated as implicit lineto commands."
            let kind = if kind == CommandKind::MoveTo && idx > 0 {
                CommandKind::LineTo
            } else {
                kind
            };
            if group.len() < arity {
                list.rejected.push(Error::Arity {
                    command: letter,
                    expected: arity,
                    found: args.len(),
                });
                continue;
            }
            let values: std::result::Result<Vec<f64>, String> = group
                .iter()
                .map(|a| match a {
                    Arg::Value(v) => Ok(*v),
                    Arg::Invalid(s) => Err(s.clone()),
                })
                .collect();
            match values {
                Ok(values) => list
                    .commands
                    .push(PathCommand::from_values(kind, relative, &values)?),
                Err(bad) => list
                    .rejected
                    .push(Error::InvalidValue("coordinate".into(), bad)),
            }
        }
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(data: &str) -> Vec<Segment> {
        tokenize(data)
            .expect("tokenize")
            .commands
            .into_iter()
            .map(|c| c.segment)
            .collect()
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        assert_eq!(
            segments("M10 20 100 200"),
            [
                Segment::MoveTo(Point::new(10., 20.)),
                Segment::LineTo(Point::new(100., 200.))
            ]
        );
    }

    #[test]
    fn test_repeated_groups() {
        let list = tokenize("h 10 80 30").expect("tokenize");
        assert_eq!(list.commands.len(), 3);
        assert!(list.commands.iter().all(|c| c.relative));
    }

    #[test]
    fn test_packed_arc_flags() {
        assert_eq!(
            segments("M0 0a5 5 30 0110 10"),
            [
                Segment::MoveTo(Point::ZERO),
                Segment::ArcTo {
                    rx: 5.,
                    ry: 5.,
                    rotation: 30.,
                    large_arc: false,
                    sweep: true,
                    to: Point::new(10., 10.)
                }
            ]
        );
    }

    #[test]
    fn test_invalid_group_skipped() {
        let list = tokenize("M 0 0 L 10 # 20 30").expect("tokenize");
        assert_eq!(
            list.commands
                .iter()
                .map(|c| c.segment)
                .collect::<Vec<_>>(),
            [
                Segment::MoveTo(Point::ZERO),
                Segment::LineTo(Point::new(20., 30.))
            ]
        );
        assert_eq!(list.rejected.len(), 1);
        assert!(matches!(list.rejected[0], Error::InvalidValue(_, _)));
    }

    #[test]
    fn test_incomplete_group_rejected() {
        let list = tokenize("M 0 0 C 1 2 3 4").expect("tokenize");
        assert_eq!(list.commands.len(), 1);
        assert!(matches!(
            list.rejected[0],
            Error::Arity {
                command: 'C',
                expected: 6,
                found: 4
            }
        ));
    }

    #[test]
    fn test_close_with_args_rejected() {
        let list = tokenize("M0 0 L 5 5 Z 3").expect("tokenize");
        assert_eq!(list.commands.len(), 3);
        assert_eq!(list.rejected.len(), 1);
    }

    #[test]
    fn test_must_start_with_command() {
        assert!(matches!(tokenize("10 20 L 5 5"), Err(Error::Parse(_))));
        assert!(tokenize("   ").expect("empty is ok").commands.is_empty());
    }
}
