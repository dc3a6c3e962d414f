//! Markup Parser - `;`-separated instructions, `,`-separated arguments
//!
//! Grammar only. Numeric tokens that are not integers are carried through as
//! text; the normalizer rejects them.

use log::{debug, warn};
use thiserror::Error;

use crate::document::{
    Circle, CropInstruction, DrawInstruction, InstructionDocument, Numeric, Point, Rectangle,
    Segment, Size,
};
use crate::palette::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Instruction {index} ('{instruction}'): '{command}' expects {expected} arguments, found {found}")]
    MissingArguments {
        index: usize,
        instruction: String,
        command: String,
        expected: usize,
        found: usize,
    },
}

/// An instruction skipped because its command is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredInstruction {
    pub index: usize,
    pub command: String,
}

/// Parser output, before the builder attaches dimensions and metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedMarkup {
    /// Last `crop` seen
    pub crop: Option<CropInstruction<Numeric>>,
    pub draw: Vec<DrawInstruction<Numeric>>,
    pub ignored: Vec<IgnoredInstruction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Crop,
    Circle,
    Rectangle,
    Line,
    Arrow,
    Gap,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "crop" => Some(Command::Crop),
            "circle" => Some(Command::Circle),
            "rectangle" => Some(Command::Rectangle),
            "line" => Some(Command::Line),
            "arrow" => Some(Command::Arrow),
            "gap" => Some(Command::Gap),
            _ => None,
        }
    }

    /// Arguments after the command name
    fn arity(self) -> usize {
        match self {
            Command::Crop => 2,
            _ => 3,
        }
    }
}

/// Parse a markup string such as `crop,0x0,50x50;circle,10x20,5,red`.
///
/// Empty instructions are skipped. Unknown commands are logged and listed in
/// `ParsedMarkup::ignored`. A second `crop` replaces the first.
pub fn parse_markup(markup: &str) -> Result<ParsedMarkup, ParseError> {
    let mut parsed = ParsedMarkup::default();

    for (index, instruction) in markup.split(';').enumerate() {
        if instruction.trim().is_empty() {
            continue;
        }

        let args: Vec<&str> = instruction.split(',').map(str::trim).collect();
        let name = args[0];

        let Some(command) = Command::from_name(name) else {
            warn!("Ignoring unknown command '{}' at instruction {}", name, index);
            parsed.ignored.push(IgnoredInstruction {
                index,
                command: name.to_string(),
            });
            continue;
        };

        let found = args.len() - 1;
        let expected = command.arity();
        if found < expected {
            return Err(ParseError::MissingArguments {
                index,
                instruction: instruction.to_string(),
                command: name.to_string(),
                expected,
                found,
            });
        }
        if found > expected {
            warn!(
                "Instruction {} ('{}'): ignoring {} extra argument(s)",
                index,
                instruction,
                found - expected
            );
        }

        let args = &args[1..];
        match command {
            Command::Crop => {
                if parsed.crop.is_some() {
                    debug!("Instruction {}: crop replaces an earlier crop", index);
                }
                parsed.crop = Some(CropInstruction {
                    from: point(args[0]),
                    size: size(args[1]),
                });
            }
            Command::Circle => parsed.draw.push(DrawInstruction::Circle(Circle {
                from: point(args[0]),
                radius: Numeric::from_token(args[1]),
                color: Color::new(args[2]),
            })),
            Command::Rectangle => parsed.draw.push(DrawInstruction::Rectangle(Rectangle {
                from: point(args[0]),
                size: size(args[1]),
                color: Color::new(args[2]),
            })),
            Command::Line | Command::Arrow | Command::Gap => {
                let segment = Segment {
                    from: point(args[0]),
                    to: point(args[1]),
                    color: Color::new(args[2]),
                };
                parsed.draw.push(match command {
                    Command::Line => DrawInstruction::Line(segment),
                    Command::Arrow => DrawInstruction::Arrow(segment),
                    _ => DrawInstruction::Gap(segment),
                });
            }
        }
    }

    Ok(parsed)
}

/// Split `AxB`. A missing half becomes empty text.
fn pair(token: &str) -> (Numeric, Numeric) {
    let mut parts = token.split('x');
    let first = parts.next().unwrap_or_default();
    let second = parts.next().unwrap_or_default();
    (Numeric::from_token(first), Numeric::from_token(second))
}

fn point(token: &str) -> Point<Numeric> {
    let (x, y) = pair(token);
    Point::new(x, y)
}

fn size(token: &str) -> Size<Numeric> {
    let (width, height) = pair(token);
    Size::new(width, height)
}

/// Write a normalized document back as markup: crop first, then draw order.
/// The stroke width is not part of the grammar and is left out.
pub fn to_markup(document: &InstructionDocument) -> String {
    let mut parts = vec![];

    if let Some(crop) = &document.instructions.crop {
        parts.push(format!(
            "crop,{}x{},{}x{}",
            crop.from.x, crop.from.y, crop.size.width, crop.size.height
        ));
    }

    for draw in &document.instructions.draw {
        let part = match draw {
            DrawInstruction::Circle(c) => {
                format!("circle,{}x{},{},{}", c.from.x, c.from.y, c.radius, c.color)
            }
            DrawInstruction::Rectangle(r) => format!(
                "rectangle,{}x{},{}x{},{}",
                r.from.x, r.from.y, r.size.width, r.size.height, r.color
            ),
            DrawInstruction::Line(s) | DrawInstruction::Arrow(s) | DrawInstruction::Gap(s) => {
                format!(
                    "{},{}x{},{}x{},{}",
                    draw.tag(),
                    s.from.x,
                    s.from.y,
                    s.to.x,
                    s.to.y,
                    s.color
                )
            }
        };
        parts.push(part);
    }

    parts.join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Numeric {
        Numeric::Int(value)
    }

    #[test]
    fn test_circle() {
        let parsed = parse_markup("circle,10x20,5,red").unwrap();
        assert_eq!(
            parsed.draw,
            vec![DrawInstruction::Circle(Circle {
                from: Point::new(int(10), int(20)),
                radius: int(5),
                color: Color::from("red"),
            })]
        );
        assert!(parsed.crop.is_none());
    }

    #[test]
    fn test_draw_order_preserved() {
        let parsed = parse_markup("rectangle,0x0,100x50,blue;line,0x0,10x10,black").unwrap();
        let tags: Vec<_> = parsed.draw.iter().map(|d| d.tag()).collect();
        assert_eq!(tags, vec!["rectangle", "line"]);
    }

    #[test]
    fn test_line_arrow_gap_share_shape() {
        let parsed = parse_markup("line,1x2,3x4,red;arrow,1x2,3x4,red;gap,1x2,3x4,red").unwrap();
        let expected = Segment {
            from: Point::new(int(1), int(2)),
            to: Point::new(int(3), int(4)),
            color: Color::from("red"),
        };
        assert_eq!(
            parsed.draw,
            vec![
                DrawInstruction::Line(expected.clone()),
                DrawInstruction::Arrow(expected.clone()),
                DrawInstruction::Gap(expected),
            ]
        );
    }

    #[test]
    fn test_empty_instructions_skipped() {
        let parsed = parse_markup(";;circle,1x1,1,red;;").unwrap();
        assert_eq!(parsed.draw.len(), 1);
        assert!(parsed.ignored.is_empty());
        assert_eq!(parse_markup("").unwrap(), ParsedMarkup::default());

        let parsed = parse_markup("circle,1x1,1,red; ;\t").unwrap();
        assert_eq!(parsed.draw.len(), 1);
        assert!(parsed.ignored.is_empty());
    }

    #[test]
    fn test_second_crop_wins() {
        let parsed = parse_markup("crop,1x1,10x10;crop,5x6,70x80").unwrap();
        let crop = parsed.crop.unwrap();
        assert_eq!(crop.from, Point::new(int(5), int(6)));
        assert_eq!(crop.size, Size::new(int(70), int(80)));
    }

    #[test]
    fn test_unknown_command_recorded() {
        let _ = env_logger::builder().is_test(true).try_init();
        let parsed = parse_markup("circle,1x1,1,red;blur,5;line,0x0,1x1,red").unwrap();
        assert_eq!(parsed.draw.len(), 2);
        assert_eq!(
            parsed.ignored,
            vec![IgnoredInstruction {
                index: 1,
                command: "blur".to_string()
            }]
        );
    }

    #[test]
    fn test_bad_numbers_deferred() {
        let parsed = parse_markup("circle,axb,big,red").unwrap();
        let DrawInstruction::Circle(circle) = &parsed.draw[0] else {
            panic!("expected circle");
        };
        assert_eq!(circle.from.x, Numeric::Text("a".into()));
        assert_eq!(circle.from.y, Numeric::Text("b".into()));
        assert_eq!(circle.radius, Numeric::Text("big".into()));
    }

    #[test]
    fn test_missing_coordinate_half_is_empty_text() {
        let parsed = parse_markup("crop,10,20x30").unwrap();
        let crop = parsed.crop.unwrap();
        assert_eq!(crop.from.x, int(10));
        assert_eq!(crop.from.y, Numeric::Text(String::new()));
    }

    #[test]
    fn test_missing_arguments_error() {
        let err = parse_markup("circle,1x1,1,red;rectangle,0x0,5x5").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingArguments {
                index: 1,
                instruction: "rectangle,0x0,5x5".to_string(),
                command: "rectangle".to_string(),
                expected: 3,
                found: 2,
            }
        );
        assert!(err.to_string().contains("Instruction 1"));
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let parsed = parse_markup("crop,0x0,10x10,extra").unwrap();
        assert!(parsed.crop.is_some());
    }

    #[test]
    fn test_colors_pass_through() {
        let parsed = parse_markup("circle,0x0,3,#ff0000").unwrap();
        assert_eq!(parsed.draw[0].color().as_str(), "#ff0000");
    }

    #[test]
    fn test_to_markup_reparses() {
        let document: InstructionDocument = InstructionDocument {
            dimensions: Size::new(200, 100),
            final_dimensions: Size::new(50, 40),
            instructions: crate::document::Instructions {
                crop: Some(CropInstruction {
                    from: Point::new(3, 4),
                    size: Size::new(50, 40),
                }),
                draw: vec![
                    DrawInstruction::Circle(Circle {
                        from: Point::new(10, 20),
                        radius: 5,
                        color: Color::from("red"),
                    }),
                    DrawInstruction::Gap(Segment {
                        from: Point::new(-1, 0),
                        to: Point::new(9, 9),
                        color: Color::from("black"),
                    }),
                ],
                stroke_width: Some(3),
            },
            source_file: "in.jpg".into(),
            destination_file: "out.jpg".into(),
            format: "jpeg".into(),
        };

        let markup = to_markup(&document);
        assert_eq!(markup, "crop,3x4,50x40;circle,10x20,5,red;gap,-1x0,9x9,black");

        let parsed = parse_markup(&markup).unwrap();
        assert_eq!(parsed.draw.len(), 2);
        assert_eq!(parsed.crop.unwrap().size, Size::new(int(50), int(40)));
    }
}
