use colored::Colorize;

use crate::parser::{AstKind, Event, Program};

use super::{CodeGen, EmittedProgram, TranslationContext};

const INDENT: &str = "    ";

/// Emits a standalone C program that owns the tape and runs the translated body.
pub struct CCodegen {
    pub tape_size: usize,
    pub context: TranslationContext,
}

impl CCodegen {
    pub fn new(tape_size: usize, context: TranslationContext) -> Self {
        Self { tape_size, context }
    }

    fn push(lines: &mut Vec<String>, depth: usize, statement: &str) {
        lines.push(INDENT.repeat(depth) + statement);
    }

    fn statement(instruction: &AstKind) -> String {
        match instruction {
            AstKind::DerefIncrement(n) => format!("(*tape) += {};", n),
            AstKind::DerefDecrement(n) => format!("(*tape) -= {};", n),
            AstKind::ShiftRight(n) => format!("tape += {};", n),
            AstKind::ShiftLeft(n) => format!("tape -= {};", n),
            AstKind::Write => "putchar(*tape);".to_owned(),
            // the cell keeps its value when the input is exhausted
            AstKind::Read => "if ((c = getchar()) != EOF) *tape = c;".to_owned(),
            AstKind::Loop(_) => "while (*tape) {".to_owned(),
        }
    }

    /// Translate the program body, starting at the context's depth.
    pub fn body(&self, program: &Program) -> Vec<String> {
        let base = self.context.depth;
        let mut lines = vec![];

        for event in program.walk() {
            match event {
                Event::Instruction(instruction, depth) => {
                    if self.context.verbose {
                        if let AstKind::Loop(body) = instruction {
                            eprintln!(
                                "{} {} {} {}",
                                "Loop at depth".blue(),
                                depth + base,
                                "with body length".blue(),
                                body.consumed_len().unwrap_or_default()
                            );
                        }
                    }
                    Self::push(&mut lines, depth + base, &Self::statement(instruction));
                }
                Event::LoopEnd(depth) => Self::push(&mut lines, depth + base, "}"),
            }
        }

        lines
    }
}

impl CodeGen for CCodegen {
    fn generate(&self, program: &Program) -> EmittedProgram {
        let mut lines = vec![
            "#include <stdio.h>".to_owned(),
            "#include <stdlib.h>".to_owned(),
            format!("#define tape_size {}", self.tape_size),
            "int main(void) {".to_owned(),
        ];
        // calloc so every cell starts at zero
        Self::push(&mut lines, 1, "unsigned char *start = calloc(tape_size, sizeof(unsigned char));");
        Self::push(&mut lines, 1, "unsigned char *tape = start;");
        Self::push(&mut lines, 1, "int c;");
        Self::push(&mut lines, 1, "if (start == NULL) return 1;");

        lines.extend(self.body(program));

        Self::push(&mut lines, 1, "free(start);");
        Self::push(&mut lines, 1, "return 0;");
        lines.push("}".to_owned());

        EmittedProgram { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;
    use quickcheck::quickcheck;

    fn body(source: &str) -> Vec<String> {
        let program = parse(source.as_bytes()).unwrap();
        CCodegen::new(30, TranslationContext::default()).body(&program)
    }

    /// Re-derive the loop nesting from the emitted text alone
    fn emitted_loop_depths(lines: &[String]) -> Vec<usize> {
        let mut depth = 0;
        let mut depths = vec![];
        for line in lines {
            let trimmed = line.trim_start();
            let indent = (line.len() - trimmed.len()) / INDENT.len();
            if trimmed == "}" {
                depth -= 1;
                assert_eq!(indent, depth + 1, "bad indentation for {:?}", line);
                continue;
            }
            assert_eq!(indent, depth + 1, "bad indentation for {:?}", line);
            if trimmed.ends_with('{') {
                depths.push(depth);
                depth += 1;
            }
        }
        assert_eq!(depth, 0);
        depths
    }

    #[test]
    fn emits_collapsed_statements() {
        assert_eq!(
            body("+++.>><-"),
            vec![
                "    (*tape) += 3;",
                "    putchar(*tape);",
                "    tape += 2;",
                "    tape -= 1;",
                "    (*tape) -= 1;",
            ]
        );
    }

    #[test]
    fn emits_conditional_read() {
        assert_eq!(body(","), vec!["    if ((c = getchar()) != EOF) *tape = c;"]);
    }

    #[test]
    fn indents_nested_loops() {
        assert_eq!(
            body("++[>[-]<]"),
            vec![
                "    (*tape) += 2;",
                "    while (*tape) {",
                "        tape += 1;",
                "        while (*tape) {",
                "            (*tape) -= 1;",
                "        }",
                "        tape -= 1;",
                "    }",
            ]
        );
    }

    #[test]
    fn respects_starting_depth() {
        let program = parse(b"[.]").unwrap();
        let context = TranslationContext {
            depth: 0,
            verbose: false,
        };
        assert_eq!(
            CCodegen::new(30, context).body(&program),
            vec!["while (*tape) {", "    putchar(*tape);", "}"]
        );
    }

    #[test]
    fn wraps_body_with_prologue_and_epilogue() {
        let program = parse(b"+").unwrap();
        let emitted = CCodegen::new(50_000, TranslationContext::default()).generate(&program);
        let text = emitted.to_string();

        assert!(text.starts_with("#include <stdio.h>\n#include <stdlib.h>\n#define tape_size 50000\n"));
        assert!(text.contains("    unsigned char *start = calloc(tape_size, sizeof(unsigned char));\n"));
        assert!(text.contains("    (*tape) += 1;\n    free(start);\n    return 0;\n}\n"));
    }

    #[test]
    fn empty_program_still_has_a_main() {
        let program = parse(b"").unwrap();
        let emitted = CCodegen::new(1, TranslationContext::default()).generate(&program);
        assert_eq!(emitted.lines.first().unwrap(), "#include <stdio.h>");
        assert_eq!(emitted.lines.last().unwrap(), "}");
        assert!(emitted.lines.iter().all(|line| !line.contains("while")));
    }

    #[test]
    fn write_to_matches_display() {
        let program = parse(b"[-]").unwrap();
        let emitted = CCodegen::new(8, TranslationContext::default()).generate(&program);
        let mut buffer = vec![];
        emitted.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), emitted.to_string());
    }

    #[test]
    fn deep_nesting() {
        let depth = 2_000;
        let source = "[".repeat(depth) + &"]".repeat(depth);
        let lines = body(&source);
        assert_eq!(lines.len(), depth * 2);
        assert_eq!(lines[depth], INDENT.repeat(depth) + "}");
        assert_eq!(lines.last().unwrap(), &(INDENT.to_owned() + "}"));
    }

    #[test]
    fn run_emits_a_single_statement() {
        fn prop(symbol: u8, len: u16) -> bool {
            let symbol = [b'+', b'-', b'>', b'<'][symbol as usize % 4] as char;
            let len = len as usize % 10_000 + 1;
            let source = std::iter::repeat(symbol).take(len).collect::<String>();
            let lines = body(&source);
            lines.len() == 1 && lines[0].ends_with(&format!("= {};", len))
        }
        quickcheck(prop as fn(u8, u16) -> bool);
    }

    #[test]
    fn nesting_round_trips_through_emitted_code() {
        fn prop(seed: Vec<u8>) -> bool {
            let source = crate::parser::tests::well_formed(&seed);
            let mut depth = 0;
            let mut expected = vec![];
            for c in source.chars() {
                if c == '[' {
                    expected.push(depth);
                    depth += 1;
                } else if c == ']' {
                    depth -= 1;
                }
            }
            emitted_loop_depths(&body(&source)) == expected
        }
        quickcheck(prop as fn(Vec<u8>) -> bool);
    }
}
