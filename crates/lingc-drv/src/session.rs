//! Two-pass orchestration: lexical-display pass, rewind, syntactic/semantic
//! pass, then the report sections and the exit code (section 10.5).

use std::fs;
use std::io::{self, Write};

use lingc_lex::Lexer;
use lingc_par::Parser;
use lingc_util::Handler;

use crate::config::Config;
use crate::error::DriverError;
use crate::report::{render_lexical_table, render_memory_footprint, render_semantic_summary, render_symbol_table};

pub struct Session {
    config: Config,
    handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, handler: Handler::new() }
    }

    /// Runs both passes against `self.config.path` and returns the process
    /// exit code: `0` iff the syntactic/semantic pass accepted and no
    /// lexical ERROR halted the lexical-display pass, `1` otherwise
    /// (section 7, section 10.5).
    pub fn run(&mut self) -> i32 {
        let source = match self.read_source() {
            Ok(source) => source,
            Err(err) => {
                eprintln!("{err}");
                return 1;
            }
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();

        let lexical_ok = self.run_lexical_pass(&source, &mut out);

        // A lexical ERROR is fatal (section 7.1): scanning halts, and the
        // second pass (which would re-lex the same source from a fresh
        // `Lexer`) is skipped rather than re-discovering and re-reporting
        // the same error.
        if self.config.tokens_only || !lexical_ok {
            if !self.config.quiet {
                let _ = render_memory_footprint(&mut out);
            }
            return if lexical_ok { 0 } else { 1 };
        }

        let accepted = self.run_syntactic_semantic_pass(&source, &mut out);

        if !self.config.quiet {
            let _ = render_memory_footprint(&mut out);
        }

        if accepted {
            0
        } else {
            1
        }
    }

    fn read_source(&self) -> Result<String, DriverError> {
        fs::read_to_string(&self.config.path)
            .map_err(|source| DriverError::Source(lingc_util::SourceError::Io {
                path: self.config.path.display().to_string(),
                source,
            }))
    }

    /// Pass 1: tokenize the full source, printing the `LINE | TOKEN_KIND |
    /// LEXEME` table. Stops at the first `Error` token (fatal, section
    /// 7.1); `Eof` ends the table without being fatal.
    fn run_lexical_pass(&self, source: &str, out: &mut impl Write) -> bool {
        let mut lexer = Lexer::new(source, &self.handler);
        let mut tokens = Vec::new();
        let mut ok = true;
        loop {
            let token = lexer.next_token();
            let is_eof = token.is_eof();
            let is_error = token.is_error();
            if is_error {
                tokens.push(token);
                ok = false;
                break;
            }
            if is_eof {
                break;
            }
            tokens.push(token);
        }

        let _ = render_lexical_table(&tokens, out);
        if !ok {
            let _ = self.handler.render(&mut io::stderr());
        }
        ok
    }

    /// Pass 2: a fresh `Parser`/`Lexer` pair over the same buffer (the
    /// single documented rewind in section 5 — realized here as a fresh
    /// lexer rather than literally rewinding the pass-1 lexer, since pass 1
    /// already dropped its own instance). Prints the verdict, then (if
    /// accepted) the symbol table, then the semantic report.
    fn run_syntactic_semantic_pass(&self, source: &str, out: &mut impl Write) -> bool {
        let mut parser = Parser::new(source, &self.handler);
        let accepted = parser.parse_program();

        if accepted {
            writeln!(out, "syntactic analysis: accepted").ok();
        } else {
            writeln!(out, "syntactic analysis: rejected").ok();
        }

        if accepted {
            parser.report_unused_functions();
            let _ = render_symbol_table(parser.symbol_table(), out);
            let _ = render_semantic_summary(&self.handler, parser.function_table(), out);
        }

        let stderr_diags: Vec<_> = self
            .handler
            .diagnostics()
            .into_iter()
            .filter(|d| accepted || d.level == lingc_util::Level::Error)
            .collect();
        for diag in stderr_diags {
            eprintln!("{diag}");
        }

        accepted
    }
}
