//! Interactive menu loop
//!
//! Each menu choice maps to one call on the cache. The shell is generic over
//! its input and output so it can be driven from tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use plrucache::PriorityCache;
use tracing::{info, warn};

use crate::render::Renderer;

/// Menu entries, numbered as displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Put,
    Get,
    Display,
    Stats,
    History,
    Clear,
    Save,
    Search,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Choice::Put),
            2 => Some(Choice::Get),
            3 => Some(Choice::Display),
            4 => Some(Choice::Stats),
            5 => Some(Choice::History),
            6 => Some(Choice::Clear),
            7 => Some(Choice::Save),
            8 => Some(Choice::Search),
            9 => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Menu-driven front end over a [`PriorityCache`]
pub struct Shell<R, W> {
    cache: PriorityCache,
    input: R,
    output: W,
    render: Renderer,
    snapshot: PathBuf,
    autosave: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        cache: PriorityCache,
        input: R,
        output: W,
        render: Renderer,
        snapshot: PathBuf,
    ) -> Self {
        Self {
            cache,
            input,
            output,
            render,
            snapshot,
            autosave: true,
        }
    }

    /// Don't write the snapshot on exit until the user saves explicitly
    ///
    /// Used when the snapshot on disk did not load cleanly, so an exit does
    /// not replace it with what was recovered.
    pub fn without_autosave(mut self) -> Self {
        self.autosave = false;
        self
    }

    /// Run until "Exit" or end of input; both save the snapshot unless
    /// autosave is off
    pub fn run(&mut self) -> Result<()> {
        loop {
            let menu = self.render.menu();
            self.output.write_all(menu.as_bytes())?;

            let line = match self.prompt("Enter choice: ")? {
                Some(line) => line,
                None => {
                    info!("Input closed, exiting");
                    self.save_on_exit()?;
                    return Ok(());
                }
            };

            let choice = match Choice::parse(&line) {
                Some(choice) => choice,
                None => {
                    self.print(self.render.error("Invalid choice! Try again."))?;
                    continue;
                }
            };

            if !self.dispatch(choice)? {
                self.save_on_exit()?;
                self.print(self.render.info("Exiting program... Goodbye!"))?;
                return Ok(());
            }
        }
    }

    /// The cache being driven
    pub fn cache(&self) -> &PriorityCache {
        &self.cache
    }

    /// Handle one choice; `Ok(false)` means exit was requested
    fn dispatch(&mut self, choice: Choice) -> Result<bool> {
        match choice {
            Choice::Put => {
                let prompt = "Enter key, value, priority (1=High,2=Med,3=Low): ";
                let numbers = match self.prompt_numbers(prompt, 2..=3)? {
                    Some(numbers) => numbers,
                    None => return Ok(true),
                };
                let (key, value) = (numbers[0], numbers[1]);
                let outcome = match numbers.get(2) {
                    Some(&priority) => self.cache.put_with_priority(key, value, priority),
                    None => self.cache.put(key, value),
                };
                // The key just written is the most recently used entry
                if let Some(stored) = self.cache.front().copied() {
                    self.print(self.render.put(&stored, &outcome))?;
                }
            }
            Choice::Get => {
                if let Some(numbers) = self.prompt_numbers("Enter key: ", 1..=1)? {
                    let value = self.cache.get(numbers[0]);
                    self.print(self.render.get(numbers[0], value))?;
                }
            }
            Choice::Display => self.print(self.render.table(&self.cache))?,
            Choice::Stats => self.print(self.render.stats(&self.cache))?,
            Choice::History => self.print(self.render.history(&self.cache.evicted()))?,
            Choice::Clear => {
                self.cache.clear();
                self.print(self.render.error("🧹 Cache cleared successfully!"))?;
            }
            Choice::Save => self.save()?,
            Choice::Search => {
                if let Some(numbers) = self.prompt_numbers("Enter key to search: ", 1..=1)? {
                    let hit = self.cache.search(numbers[0]);
                    self.print(self.render.search(numbers[0], hit.as_ref()))?;
                }
            }
            Choice::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn save(&mut self) -> Result<()> {
        match self.cache.save_snapshot(&self.snapshot) {
            Ok(count) => {
                info!("Saved {} entries to {:?}", count, self.snapshot);
                self.autosave = true;
                self.print(self.render.info("💾 Cache saved to file successfully!"))
            }
            Err(e) => {
                warn!("Snapshot save to {:?} failed: {}", self.snapshot, e);
                self.print(self.render.error(&format!("Could not save cache: {}", e)))
            }
        }
    }

    fn save_on_exit(&mut self) -> Result<()> {
        if self.autosave {
            return self.save();
        }
        warn!("Not overwriting {:?}; it did not load cleanly", self.snapshot);
        let message = format!(
            "Snapshot {} was not loaded cleanly and was left untouched. Use 7 to overwrite it.",
            self.snapshot.display()
        );
        self.print(self.render.error(&message))
    }

    /// Read a line of whitespace-separated integers; `None` on bad input or EOF
    fn prompt_numbers(
        &mut self,
        prompt: &str,
        count: std::ops::RangeInclusive<usize>,
    ) -> Result<Option<Vec<i32>>> {
        let line = match self.prompt(prompt)? {
            Some(line) => line,
            None => return Ok(None),
        };

        let parsed: std::result::Result<Vec<i32>, _> =
            line.split_whitespace().map(str::parse::<i32>).collect();
        match parsed {
            Ok(numbers) if count.contains(&numbers.len()) => Ok(Some(numbers)),
            _ => {
                self.print(self.render.error("Invalid input! Expected integers."))?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        read_line(&mut self.input, &mut self.output, prompt)
    }

    fn print(&mut self, text: String) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

/// Ask for the cache capacity until a positive integer is entered
pub fn prompt_capacity<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize> {
    loop {
        let line = match read_line(input, output, "Enter cache capacity: ")? {
            Some(line) => line,
            None => bail!("no cache capacity given"),
        };
        match line.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => return Ok(capacity),
            _ => writeln!(output, "Capacity must be a positive integer.")?,
        }
    }
}

fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    // Bytes, not `read_line`: invalid UTF-8 becomes bad input instead of an error
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).trim_end().to_string()))
}
