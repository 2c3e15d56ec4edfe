//! Interactive topic prompt.

use std::io::{self, BufRead, Write};

use edcast::script::Topic;

/// Topic used when the user just presses Enter.
pub const DEFAULT_TOPIC: &str = "How plants make oxygen";

/// Ask for a topic on `output` and read one line from `input`.
///
/// Empty input or end of input yields [`DEFAULT_TOPIC`].
pub fn read_topic<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Topic> {
    write!(output, "Enter topic: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let topic = Topic::new(&line);
    Ok(if topic.is_empty() {
        Topic::new(DEFAULT_TOPIC)
    } else {
        topic
    })
}
