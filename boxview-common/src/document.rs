use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{canvas::CanvasDimensions, error::BoxviewDocumentError, types::FaceId};

/// The serialized output of a layout run: a face table plus one entry per box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializedDocument {
    #[serde(default)]
    pub faces: Vec<FaceEntry>,
    pub layouts: Vec<LayoutDescriptor>,
}

impl SerializedDocument {
    pub fn from_json_str(s: &str) -> Result<Self, BoxviewDocumentError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Maps a face to a font file, serialized as `[index, variant, path]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u32, u32, String)", into = "(u32, u32, String)")]
pub struct FaceEntry {
    pub face: FaceId,
    pub path: String,
}

impl From<(u32, u32, String)> for FaceEntry {
    fn from((index, variant, path): (u32, u32, String)) -> Self {
        Self {
            face: FaceId::new(index, variant),
            path,
        }
    }
}

impl From<FaceEntry> for (u32, u32, String) {
    fn from(entry: FaceEntry) -> Self {
        (entry.face.index, entry.face.variant, entry.path)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub x: f32,
    pub y: f32,
}

/// One box: its size in points and the commands that draw it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    pub dimensions: Size,
    #[serde(default)]
    pub commands: Vec<RawCommand>,
}

impl LayoutDescriptor {
    pub fn new(width: f32, height: f32, commands: &[Command]) -> Self {
        Self {
            dimensions: Size {
                x: width,
                y: height,
            },
            commands: commands.iter().map(RawCommand::from).collect(),
        }
    }

    pub fn canvas_dimensions(&self, scale: f32) -> CanvasDimensions {
        CanvasDimensions {
            size: [self.dimensions.x, self.dimensions.y],
            scale,
        }
    }
}

/// A drawing command as it appears on the wire, e.g. `["m", 1.5, 3.0]`.
///
/// The tag is only checked when the command is decoded, so a document with an
/// unknown tag still loads and fails when that box is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCommand(pub Vec<Value>);

impl RawCommand {
    pub fn tag(&self) -> Option<&str> {
        self.0.first().and_then(Value::as_str)
    }

    pub fn decode(&self) -> Result<Command, BoxviewDocumentError> {
        let Some(tag) = self.tag() else {
            return Err(BoxviewDocumentError::MalformedInput(format!(
                "command has no tag: {}",
                Value::Array(self.0.clone())
            )));
        };
        let args = &self.0[1..];

        let command = match tag {
            "m" => {
                expect_arity(tag, args, 2)?;
                Command::MoveCursor {
                    x: arg_f32(tag, args, 0)?,
                    y: arg_f32(tag, args, 1)?,
                }
            }
            "f" => {
                expect_arity(tag, args, 3)?;
                Command::SelectFont {
                    face: FaceId::new(arg_u32(tag, args, 0)?, arg_u32(tag, args, 1)?),
                    size: arg_f32(tag, args, 2)?,
                }
            }
            "w" => {
                expect_arity(tag, args, 1)?;
                let Some(text) = args[0].as_str() else {
                    return Err(malformed(tag, 0, "a string"));
                };
                Command::WriteText {
                    text: text.to_string(),
                }
            }
            "b" => {
                expect_arity(tag, args, 2)?;
                Command::DrawRect {
                    width: arg_f32(tag, args, 0)?,
                    height: arg_f32(tag, args, 1)?,
                }
            }
            _ => {
                return Err(BoxviewDocumentError::InvalidCommand {
                    tag: tag.to_string(),
                })
            }
        };
        Ok(command)
    }
}

fn expect_arity(tag: &str, args: &[Value], n: usize) -> Result<(), BoxviewDocumentError> {
    if args.len() != n {
        return Err(BoxviewDocumentError::MalformedInput(format!(
            "command `{tag}` expects {n} arguments, got {}",
            args.len()
        )));
    }
    Ok(())
}

fn arg_f32(tag: &str, args: &[Value], i: usize) -> Result<f32, BoxviewDocumentError> {
    args[i]
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| malformed(tag, i, "a number"))
}

fn arg_u32(tag: &str, args: &[Value], i: usize) -> Result<u32, BoxviewDocumentError> {
    args[i]
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| malformed(tag, i, "an unsigned integer"))
}

fn malformed(tag: &str, i: usize, expected: &str) -> BoxviewDocumentError {
    BoxviewDocumentError::MalformedInput(format!(
        "argument {i} of command `{tag}` must be {expected}"
    ))
}

/// The closed set of drawing commands a box understands. Lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveCursor { x: f32, y: f32 },
    SelectFont { face: FaceId, size: f32 },
    WriteText { text: String },
    DrawRect { width: f32, height: f32 },
}

impl Command {
    pub fn tag(&self) -> &'static str {
        match self {
            Command::MoveCursor { .. } => "m",
            Command::SelectFont { .. } => "f",
            Command::WriteText { .. } => "w",
            Command::DrawRect { .. } => "b",
        }
    }
}

impl From<&Command> for RawCommand {
    fn from(command: &Command) -> Self {
        let tag = Value::from(command.tag());
        let values = match command {
            Command::MoveCursor { x, y } => vec![tag, Value::from(*x), Value::from(*y)],
            Command::SelectFont { face, size } => vec![
                tag,
                Value::from(face.index),
                Value::from(face.variant),
                Value::from(*size),
            ],
            Command::WriteText { text } => vec![tag, Value::from(text.as_str())],
            Command::DrawRect { width, height } => {
                vec![tag, Value::from(*width), Value::from(*height)]
            }
        };
        RawCommand(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "faces": [[0, 0, "NotoSans-Regular.ttf"], [0, 1, "NotoSans-Bold.ttf"]],
        "layouts": [
            {
                "dimensions": {"x": 100.0, "y": 40.0},
                "commands": [["m", 0, 0], ["f", 0, 1, 12.5], ["w", "Hi"], ["b", 20.0, 10.0]]
            },
            {"dimensions": {"x": 5.0, "y": 5.0}, "commands": []}
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = SerializedDocument::from_json_str(DOCUMENT).unwrap();
        assert_eq!(doc.faces.len(), 2);
        assert_eq!(doc.faces[1].face, FaceId::new(0, 1));
        assert_eq!(doc.faces[1].path, "NotoSans-Bold.ttf");
        assert_eq!(doc.layouts.len(), 2);
        assert!(doc.layouts[1].commands.is_empty());

        let commands = doc.layouts[0]
            .commands
            .iter()
            .map(RawCommand::decode)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveCursor { x: 0.0, y: 0.0 },
                Command::SelectFont {
                    face: FaceId::new(0, 1),
                    size: 12.5
                },
                Command::WriteText {
                    text: "Hi".to_string()
                },
                Command::DrawRect {
                    width: 20.0,
                    height: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_unknown_tag_is_invalid_command() {
        let raw: RawCommand = serde_json::from_str(r#"["z", 1]"#).unwrap();
        match raw.decode() {
            Err(BoxviewDocumentError::InvalidCommand { tag }) => assert_eq!(tag, "z"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_bad_arguments_are_malformed() {
        for json in [r#"["m", 1]"#, r#"["b", "wide", 2]"#, r#"["f", -1, 0, 12]"#, r#"[]"#, r#"["w", 3]"#] {
            let raw: RawCommand = serde_json::from_str(json).unwrap();
            assert!(
                matches!(raw.decode(), Err(BoxviewDocumentError::MalformedInput(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn test_structurally_invalid_document() {
        let err = SerializedDocument::from_json_str(r#"{"layouts": [{"commands": []}]}"#);
        assert!(matches!(err, Err(BoxviewDocumentError::Json(_))));
    }

    #[test]
    fn test_command_to_raw_decodes_back() {
        let layout = LayoutDescriptor::new(
            10.0,
            10.0,
            &[Command::SelectFont {
                face: FaceId::new(2, 1),
                size: 9.0,
            }],
        );
        assert_eq!(layout.commands[0].tag(), Some("f"));
        assert_eq!(
            layout.commands[0].decode().unwrap(),
            Command::SelectFont {
                face: FaceId::new(2, 1),
                size: 9.0
            }
        );
    }
}
