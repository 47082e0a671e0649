use clap::Parser;
use prereq::CourseId;

#[derive(Debug, Parser)]
pub struct Codes {
    /// The text to scan. Read from stdin when omitted.
    text: Option<String>,
}

impl Codes {
    pub fn run(self) -> anyhow::Result<()> {
        let text = super::text_or_stdin(self.text)?;
        for id in CourseId::find_all(&text) {
            println!("{id}");
        }
        Ok(())
    }
}
