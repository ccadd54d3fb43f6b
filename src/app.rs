use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::data::model::{EnrollmentDataset, SchoolDirectory};
use crate::report::{DatasetSummary, GeneralReport, SchoolReport};
use crate::stats::StatisticsEngine;
use crate::ui::prompt::prompt_for_school;

pub const TITLE: &str = "ENSF 692 School Enrollment Statistics";

// ---------------------------------------------------------------------------
// Terminal session
// ---------------------------------------------------------------------------

/// One full session: header, prompt, requested school, then all schools.
pub struct App<'a> {
    pub directory: &'a SchoolDirectory,
    pub dataset: &'a EnrollmentDataset,
    pub config: &'a ReportConfig,
}

impl<'a> App<'a> {
    pub fn new(
        directory: &'a SchoolDirectory,
        dataset: &'a EnrollmentDataset,
        config: &'a ReportConfig,
    ) -> Self {
        App {
            directory,
            dataset,
            config,
        }
    }

    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "\n{TITLE}\n")?;
        write!(output, "{}", DatasetSummary::of(self.dataset))?;

        let school = prompt_for_school(input, output, self.directory)?;
        let engine = StatisticsEngine::new(self.dataset);

        let school_report = SchoolReport::build(&engine, &school, self.config)
            .with_context(|| format!("computing statistics for {}", school.name))?;
        write!(output, "{school_report}")?;

        let general_report =
            GeneralReport::build(&engine, self.config).context("computing general statistics")?;
        write!(output, "{general_report}")?;

        output.flush()?;
        Ok(())
    }
}
