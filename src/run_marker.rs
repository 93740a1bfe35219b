use std::fs;
use std::path::{Path, PathBuf};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use log::info;
use crate::errors::MarkerError;

/// Keeps track of whether the daily post has already been made
pub trait RunMarker {
    fn has_run_today(&self) -> Result<bool, MarkerError>;
    fn mark_run_today(&mut self) -> Result<(), MarkerError>;
}

/// Run marker backed by a text file holding the civil date of the last successful run
pub struct FileRunMarker {
    path: PathBuf,
    tz: Tz,
}

impl FileRunMarker {
    /// Returns a new instance of the FileRunMarker struct
    ///
    /// # Arguments
    ///
    /// * 'path' - the marker file
    /// * 'tz' - timezone deciding what "today" is
    pub fn new(path: impl AsRef<Path>, tz: Tz) -> FileRunMarker {
        FileRunMarker { path: path.as_ref().to_path_buf(), tz }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// Returns true if the marker file holds the given date
    ///
    /// # Arguments
    ///
    /// * 'date' - date to check for
    pub fn has_run_on(&self, date: NaiveDate) -> Result<bool, MarkerError> {
        if !self.path.exists() {
            info!("No previous run file found, first run today");
            return Ok(false);
        }

        let last_run = fs::read_to_string(&self.path)?;
        let ran = last_run.trim() == date.format("%Y-%m-%d").to_string();
        info!("Already ran today? {}", ran);

        Ok(ran)
    }

    /// Writes the given date to the marker file
    ///
    /// # Arguments
    ///
    /// * 'date' - date to record
    pub fn mark_run_on(&self, date: NaiveDate) -> Result<(), MarkerError> {
        fs::write(&self.path, date.format("%Y-%m-%d").to_string())?;
        info!("Marked as run for {}", date);

        Ok(())
    }
}

impl RunMarker for FileRunMarker {
    fn has_run_today(&self) -> Result<bool, MarkerError> {
        self.has_run_on(self.today())
    }

    fn mark_run_today(&mut self) -> Result<(), MarkerError> {
        self.mark_run_on(self.today())
    }
}

/// Run marker held in memory, for use where nothing should touch the file system
#[cfg(test)]
#[derive(Default)]
pub struct MemoryRunMarker {
    pub ran: bool,
}

#[cfg(test)]
impl RunMarker for MemoryRunMarker {
    fn has_run_today(&self) -> Result<bool, MarkerError> {
        Ok(self.ran)
    }

    fn mark_run_today(&mut self) -> Result<(), MarkerError> {
        self.ran = true;
        Ok(())
    }
}
