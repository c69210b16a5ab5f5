use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes Graphviz source to `path`, replacing any existing file.
pub(crate) fn write_file(path: &Path, source: &str) -> io::Result<()> {
    let mut f = BufWriter::new(fs::File::create(path)?);
    f.write_all(source.as_bytes())?;
    f.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_source_verbatim() {
        let path = std::env::temp_dir().join(format!("regex2dfa-dot-{}.dot", std::process::id()));
        write_file(&path, "digraph DFA {\n}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "digraph DFA {\n}\n");
        fs::remove_file(&path).unwrap();
    }
}
