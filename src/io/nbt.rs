use byteorder::{BE, WriteBytesExt};
use std::io::{self, Write};

/// Type id of a tag in the named binary tag format.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
}

impl Tag {
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Sequential big-endian encoder for named binary tags.
///
/// The writer keeps no state: it does not know which compound is open or
/// whether a payload matches the tag that announced it. Every
/// [`Tag::Compound`] started with [`start_named_tag`](Self::start_named_tag)
/// must be closed by exactly one [`write_end`](Self::write_end), and lists
/// and arrays must be followed by exactly the announced number of elements.
///
/// # Example
/// ```rust
/// use legacy_schem::io::nbt::{Tag, WriteNbt};
///
/// let mut buffer: Vec<u8> = Vec::new();
/// buffer.start_named_tag(Tag::Compound, "root").unwrap();
/// buffer.start_named_tag(Tag::Short, "answer").unwrap();
/// buffer.write_short(42).unwrap();
/// buffer.write_end().unwrap();
///
/// assert_eq!(buffer[0], Tag::Compound.id());
/// assert_eq!(buffer.last(), Some(&0));
/// ```
///
/// # Partial Writes
/// An error leaves whatever bytes were already accepted by the sink in
/// place; the stream must then be considered truncated.
pub trait WriteNbt: Write {
    fn write_byte(&mut self, value: i8) -> io::Result<()> {
        self.write_i8(value)
    }

    fn write_short(&mut self, value: i16) -> io::Result<()> {
        self.write_i16::<BE>(value)
    }

    fn write_int(&mut self, value: i32) -> io::Result<()> {
        self.write_i32::<BE>(value)
    }

    fn write_long(&mut self, value: i64) -> io::Result<()> {
        self.write_i64::<BE>(value)
    }

    fn write_float(&mut self, value: f32) -> io::Result<()> {
        self.write_f32::<BE>(value)
    }

    fn write_double(&mut self, value: f64) -> io::Result<()> {
        self.write_f64::<BE>(value)
    }

    /// Writes a string with an unsigned 16-bit length prefix.
    ///
    /// The prefix is `len as u16`: strings longer than 65535 bytes get a
    /// wrapped length while all their bytes are still written.
    fn write_string(&mut self, value: &str) -> io::Result<()> {
        self.write_u16::<BE>(value.len() as u16)?;
        self.write_all(value.as_bytes())
    }

    /// Type id followed by the tag name. The payload comes next.
    fn start_named_tag(&mut self, tag: Tag, name: &str) -> io::Result<()> {
        self.write_u8(tag.id())?;
        self.write_string(name)
    }

    /// Element type followed by the element count. `length` unnamed payloads
    /// of type `tag` must follow.
    fn start_list(&mut self, tag: Tag, length: i32) -> io::Result<()> {
        self.write_u8(tag.id())?;
        self.write_int(length)
    }

    /// Length prefix of a byte array. `length` raw bytes must follow.
    fn start_byte_array(&mut self, length: i32) -> io::Result<()> {
        self.write_int(length)
    }

    /// Length prefix and contents of a byte array.
    fn write_byte_array(&mut self, data: &[u8]) -> io::Result<()> {
        self.start_byte_array(data.len() as i32)?;
        self.write_all(data)
    }

    /// Closes the innermost open compound.
    fn write_end(&mut self) -> io::Result<()> {
        self.write_u8(Tag::End.id())
    }
}

impl<W: Write + ?Sized> WriteNbt for W {}
