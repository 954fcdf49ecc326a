//! Token dispatch over files and blocks
//!
use crate::{error::Result, item::Item, read::StfReader};

/// Handler called when its token is read. It receives the reader, positioned
/// just after the token, and the caller's context.
pub type Processor<'a, C> = Box<dyn FnMut(&mut StfReader, &mut C) -> Result<()> + 'a>;

/// A token and the handler to run for it
pub struct TokenProcessor<'a, C> {
    token: String,
    processor: Processor<'a, C>,
}

impl<'a, C> TokenProcessor<'a, C> {
    /// Tokens are matched case-insensitively
    pub fn new(
        token: &str,
        processor: impl FnMut(&mut StfReader, &mut C) -> Result<()> + 'a,
    ) -> Self {
        TokenProcessor {
            token: token.to_lowercase(),
            processor: Box::new(processor),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl StfReader {
    /// Read items to the end of input and run the first processor whose
    /// token matches each one. Unclaimed blocks are skipped.
    pub fn parse_file<C>(
        &mut self,
        context: &mut C,
        processors: &mut [TokenProcessor<'_, C>],
    ) -> Result<()> {
        self.parse_file_until(context, |_| false, processors)
    }

    /// Like [`StfReader::parse_file`], stopping as soon as `breakout` holds
    pub fn parse_file_until<C>(
        &mut self,
        context: &mut C,
        mut breakout: impl FnMut(&C) -> bool,
        processors: &mut [TokenProcessor<'_, C>],
    ) -> Result<()> {
        while !self.eof() {
            if breakout(context) {
                break;
            }
            let item = self.read_item()?;
            if item.is_open() {
                self.skip_rest_of_block()?;
                continue;
            }
            self.dispatch(&item, context, processors)?;
        }
        Ok(())
    }

    /// Read items up to the `)` closing the current block and dispatch
    /// them like [`StfReader::parse_file`]
    pub fn parse_block<C>(
        &mut self,
        context: &mut C,
        processors: &mut [TokenProcessor<'_, C>],
    ) -> Result<()> {
        self.parse_block_until(context, |_| false, processors)
    }

    /// Like [`StfReader::parse_block`]. When `breakout` holds the rest of
    /// the block is skipped.
    pub fn parse_block_until<C>(
        &mut self,
        context: &mut C,
        mut breakout: impl FnMut(&C) -> bool,
        processors: &mut [TokenProcessor<'_, C>],
    ) -> Result<()> {
        while !self.end_of_block() {
            if breakout(context) {
                self.skip_rest_of_block()?;
                break;
            }
            let item = self.read_item()?;
            if item.is_open() {
                self.skip_rest_of_block()?;
                continue;
            }
            self.dispatch(&item, context, processors)?;
        }
        Ok(())
    }

    /// Read a whole `( ... )` block, dispatching its contents
    pub fn parse_whole_block<C>(
        &mut self,
        context: &mut C,
        processors: &mut [TokenProcessor<'_, C>],
    ) -> Result<()> {
        self.verify_start_of_block()?;
        self.parse_block(context, processors)
    }

    /// Read `( count name(...) name(...) ... )`, building one value per
    /// `name` block with `constructor`
    pub fn parse_block_list<T>(
        &mut self,
        block_name: &str,
        mut constructor: impl FnMut(&mut StfReader) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.verify_start_of_block()?;
        let count = self.read_int(None)?;

        let mut state = (count, Vec::new());
        self.parse_block(
            &mut state,
            &mut [TokenProcessor::new(
                block_name,
                |reader, (remaining, list): &mut (i32, Vec<T>)| {
                    if *remaining > 0 {
                        *remaining -= 1;
                        list.push(constructor(reader)?);
                    } else {
                        reader.warn(format!("Skipped extra {block_name}"));
                    }
                    Ok(())
                },
            )],
        )?;

        let (remaining, list) = state;
        if remaining > 0 {
            self.warn(format!("{remaining} missing {block_name}"));
        }
        Ok(list)
    }

    fn dispatch<C>(
        &mut self,
        item: &Item,
        context: &mut C,
        processors: &mut [TokenProcessor<'_, C>],
    ) -> Result<()> {
        let token = item.as_str().to_lowercase();
        if let Some(found) = processors.iter_mut().find(|p| p.token == token) {
            (found.processor)(self, context)?;
        }
        Ok(())
    }
}
