use anyhow::Context;
use std::fmt;
use std::io::BufRead;

/// Kind tag written at the front of every stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` frame header
    ///
    /// # Returns
    ///
    /// The object type and the payload length the header declares
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<(ObjectType, usize)> {
        let kind = read_field(reader, b' ')?;
        let size = read_field(reader, b'\0')?;

        let object_type = ObjectType::try_from(kind.as_str())?;
        let size = size
            .parse::<usize>()
            .with_context(|| format!("Invalid {object_type} size: {size:?}"))?;

        Ok((object_type, size))
    }
}

fn read_field(reader: &mut impl BufRead, delimiter: u8) -> anyhow::Result<String> {
    let mut field = Vec::new();
    reader.read_until(delimiter, &mut field)?;

    if field.pop() != Some(delimiter) {
        anyhow::bail!("Object header ends before {:?}", delimiter as char);
    }

    Ok(String::from_utf8(field)?)
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Unknown object type: {value:?}")),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
