use std::fmt::Display;

use chrono::{Local, TimeZone};
use spdlog::info;

use crate::config::{Config, Output, Paths, Source};
use crate::emitter::PostWriter;
use crate::error::Result;
use crate::post::PostTransformer;
use crate::source::PostSource;

/// Reads every post from the old database and writes one markdown file per post.
pub struct Converter {
    paths: Paths,
    source: Source,
    output: Output,
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        Converter {
            paths: config.paths.clone(),
            source: config.source.clone(),
            output: config.output.clone(),
        }
    }

    /// Runs the whole conversion with dates in the machine's local timezone.
    /// Returns the number of files written.
    pub fn run(&self) -> Result<usize> {
        self.run_in(Local)
    }

    pub fn run_in<Tz>(&self, tz: Tz) -> Result<usize>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let source = PostSource::open(&self.paths.source_db, &self.source.table)?;
        let transformer = PostTransformer::new(tz, self.output.ascii_json);
        let writer = PostWriter::new(&self.paths.output_dir, &self.output.extension, &self.output.delimiter);

        let mut query = source.query()?;
        let mut count = 0;
        for record in query.records()? {
            let record = record?;
            info!("{}", record);

            let post = transformer.transform(&record)?;
            writer.write(&record.name, &post)?;
            count += 1;
        }

        Ok(count)
    }
}
