use clap::Parser;
use prereq::CourseId;
use tracing::instrument;

#[derive(Debug, Parser)]
pub struct Compile {
    /// The course the text belongs to (e.g. 'ELEC 201')
    #[arg(long, short, value_parser = super::parse_course)]
    course: CourseId,

    /// The requisite text. Read from stdin when omitted.
    text: Option<String>,
}

impl Compile {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let text = super::text_or_stdin(self.text)?;
        let record = prereq::compile(&self.course, &text);
        println!("{}", serde_json::to_string_pretty(&record)?);
        Ok(())
    }
}
