//! A scanner and a printer bound together.

use std::io::{StdinLock, Stdout, Write};

use crate::{
    printer::Printer,
    scanner::Scanner,
    source::{ReaderSource, Source},
};

/// Interactive console: a [`Scanner`] over the input and a [`Printer`] over
/// the output.
///
/// Construct one per program and pass it where it is needed.
///
/// ```rust
/// use scanio::{Console, Printer, Scanner};
///
/// let mut console = Console::new(Scanner::from_text("3 4"), Printer::new(Vec::new()));
/// let sum = console.input.next_i32()? + console.input.next_i32()?;
/// console.output.println(sum);
/// assert_eq!(console.close(), b"7\n");
/// # Ok::<(), scanio::ScanError>(())
/// ```
#[derive(Debug)]
pub struct Console<S: Source, W: Write> {
    pub input: Scanner<S>,
    pub output: Printer<W>,
}

impl<S: Source, W: Write> Console<S, W> {
    #[must_use]
    pub fn new(input: Scanner<S>, output: Printer<W>) -> Self {
        Self { input, output }
    }

    /// Flushes the output, closes the input and returns the output sink.
    pub fn close(self) -> W {
        let Self { mut input, mut output } = self;
        output.flush();
        input.close();
        output.into_inner()
    }
}

impl Console<ReaderSource<StdinLock<'static>>, Stdout> {
    /// Binds standard input and standard output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(Scanner::stdin(), Printer::stdout())
    }
}
