//! Renders the four stdout report sections (lexical table, symbol table,
//! semantic summary, memory-footprint placeholder). The syntactic verdict is
//! rendered inline in [`crate::session::Session::run`] since it needs no
//! more than a `bool`.

use std::io::{self, Write};

use lingc_lex::Token;
use lingc_util::{FunctionTable, Handler, SymbolTable};

/// `LINE | TOKEN_KIND | LEXEME`, one row per token up to (but not including)
/// the terminating `Eof`/`Error`.
pub fn render_lexical_table(tokens: &[Token], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<6} | {:<14} | {}", "LINE", "TOKEN_KIND", "LEXEME")?;
    for token in tokens {
        writeln!(out, "{:<6} | {:<14} | {}", token.line, format!("{}", token.kind), token.lexeme)?;
    }
    Ok(())
}

/// `NAME | TYPE | SCOPE | LIMITER | VALUE`, in declaration order, then the
/// total-variable-count summary.
pub fn render_symbol_table(symtab: &SymbolTable, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<15} | {:<10} | {:<15} | {:<10} | {}", "NAME", "TYPE", "SCOPE", "LIMITER", "VALUE")?;
    for entry in symtab.iter() {
        let limiter = entry.limiter.map(|l| format!("[{l}]")).unwrap_or_else(|| "N/A".to_string());
        let value = entry.value.as_deref().unwrap_or("N/A");
        writeln!(out, "{:<15} | {:<10} | {:<15} | {:<10} | {}", entry.name, entry.ty, entry.scope, limiter, value)?;
    }
    writeln!(out, "total variables: {}", symtab.len())
}

/// The success/alert banner plus `total functions declared: N` — the
/// warnings themselves have already gone to stderr, in emission order, as
/// the analyzer found them.
pub fn render_semantic_summary(handler: &Handler, funtab: &FunctionTable, out: &mut impl Write) -> io::Result<()> {
    if !handler.has_warnings() {
        writeln!(out, "semantic analysis completed with no alerts.")?;
    } else {
        writeln!(out, "semantic alerts were emitted during analysis.")?;
    }
    writeln!(out, "total functions declared: {}", funtab.len())
}

/// No allocator shim is wired into this crate (section 1's scope
/// boundary); this line stands in for the original's memory-accountant
/// report.
pub fn render_memory_footprint(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "memory footprint: not tracked (no allocator shim wired in)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingc_lex::TokenKind;

    #[test]
    fn lexical_table_has_one_row_per_token() {
        let tokens = vec![Token::new(TokenKind::Principal, "principal", 1), Token::new(TokenKind::LParen, "(", 1)];
        let mut buf = Vec::new();
        render_lexical_table(&tokens, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn symbol_table_reports_total() {
        let mut symtab = SymbolTable::new();
        symtab.insert("!x", lingc_util::DataType::Integer, "principal", None);
        let mut buf = Vec::new();
        render_symbol_table(&symtab, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("total variables: 1"));
    }

    #[test]
    fn semantic_summary_reports_function_count() {
        let handler = Handler::new();
        let mut funtab = FunctionTable::new();
        funtab.insert("principal", 1);
        let mut buf = Vec::new();
        render_semantic_summary(&handler, &funtab, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("total functions declared: 1"));
        assert!(text.contains("no alerts"));
    }
}
