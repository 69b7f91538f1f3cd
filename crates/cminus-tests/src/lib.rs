//! Integration tests for the C-Minus front end
//!
//! This crate provides end-to-end testing of the pipeline:
//! Source → Lexer → Parser → AST outline

use cminus_error::{DiagnosticRenderer, SourceFile, ToDiagnostic};
use cminus_lexer::tokenize;
use cminus_parser::{parse, AstPrinter, FrontendError, Program};
use std::io;
use std::path::Path;

/// Result of running C-Minus source through the front end
#[derive(Debug)]
pub struct CompileResult {
    /// Whether scanning and parsing both succeeded
    pub success: bool,
    /// Number of tokens produced, EOF included (0 if scanning failed)
    pub token_count: usize,
    /// The tree (if successful)
    pub program: Option<Program>,
    /// AST outline (for debugging)
    pub outline: Option<String>,
    /// The failure, if any
    pub error: Option<FrontendError>,
}

impl CompileResult {
    fn failed(token_count: usize, error: FrontendError) -> Self {
        Self {
            success: false,
            token_count,
            program: None,
            outline: None,
            error: Some(error),
        }
    }
}

/// Scans and parses C-Minus source
pub fn compile(source: &str) -> CompileResult {
    // Phase 1: Lexing
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => return CompileResult::failed(0, e.into()),
    };
    let token_count = tokens.len();

    // Phase 2: Parsing
    let program = match parse(tokens) {
        Ok(program) => program,
        Err(e) => return CompileResult::failed(token_count, e.into()),
    };

    let outline = AstPrinter::new().print_program(&program);

    CompileResult {
        success: true,
        token_count,
        program: Some(program),
        outline: Some(outline),
        error: None,
    }
}

/// Reads and compiles a source file
pub fn compile_file(path: &Path) -> io::Result<CompileResult> {
    let source = std::fs::read_to_string(path)?;
    Ok(compile(&source))
}

/// Renders the failure of `result` against `file`, without colors
pub fn render_error(file: &SourceFile, result: &CompileResult) -> Option<String> {
    let error = result.error.as_ref()?;
    let renderer = DiagnosticRenderer::new(file).without_colors();
    Some(renderer.render(&error.to_diagnostic()))
}

/// Asserts that source code parses and returns the tree
pub fn assert_parses(source: &str) -> Program {
    let result = compile(source);
    match result.program {
        Some(program) => program,
        None => panic!("Expected source to parse, but got error:\n{:?}", result.error),
    }
}

/// Asserts that source code is rejected and returns the error
pub fn assert_parse_fails(source: &str) -> FrontendError {
    let result = compile(source);
    match result.error {
        Some(error) => error,
        None => panic!("Expected source to fail, but it parsed:\n{:?}", result.outline),
    }
}

/// Asserts that source code parses and the outline contains a specific string
pub fn assert_outline_contains(source: &str, expected: &str) {
    let result = compile(source);
    let Some(outline) = result.outline else {
        panic!("Expected source to parse, but got error:\n{:?}", result.error);
    };
    if !outline.contains(expected) {
        panic!(
            "Expected outline to contain '{}', but it didn't.\n\nOutline:\n{}",
            expected, outline
        );
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use cminus_parser::*;

    // =========================================
    // Declarations
    // =========================================

    #[test]
    fn test_empty_program_fails() {
        let result = compile("");
        assert!(!result.success);
        assert_eq!(result.token_count, 1);
    }

    #[test]
    fn test_comment_only_program_fails() {
        let error = assert_parse_fails("/* nothing here */");
        assert!(matches!(error, FrontendError::Parse(_)));
    }

    #[test]
    fn test_global_declarations() {
        let program = assert_parses("int a; int b[4]; void c;");
        assert_eq!(program.declarations.len(), 3);
        assert_eq!(program.declarations[1].kind(), NodeKind::ArrayDeclaration);
    }

    #[test]
    fn test_function_after_function() {
        let program = assert_parses(
            r#"
int one(void) { return 1; }
int two(void) { return one() + one(); }
"#,
        );
        assert_eq!(program.declarations.len(), 2);
        assert_eq!(program.declarations[1].name(), "two");
        assert_eq!(program.declarations[1].line(), 3);
    }

    #[test]
    fn test_array_param() {
        assert_outline_contains("int sum(int a[], int n) { return 0; }", "Param: int a[]");
    }

    // =========================================
    // Statements
    // =========================================

    #[test]
    fn test_nested_blocks() {
        assert_outline_contains(
            r#"
void f(void)
{
    int x;
    {
        int y;
        {
            y = x;
        }
    }
}
"#,
            "          LocalDeclarations:\n            VarDeclaration: int y\n",
        );
    }

    #[test]
    fn test_dangling_else() {
        let program = assert_parses("void f(void) { if (a) if (b) x = 1; else x = 2; }");
        let Declaration::Fun(f) = &program.declarations[0] else {
            panic!("Expected FunDeclaration");
        };
        let Stmt::Selection(outer) = &f.body.statements[0] else {
            panic!("Expected SelectionStmt");
        };
        assert!(outer.else_branch.is_none());
        assert!(matches!(
            outer.then_branch.as_ref(),
            Stmt::Selection(SelectionStmt {
                else_branch: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn test_while_with_empty_body() {
        assert_outline_contains(
            "void f(void) { while (x) ; }",
            "WhileStmt:\n          Condition:\n            Variable: x\n          Body:\n            ExpressionStmt: ;\n",
        );
    }

    #[test]
    fn test_void_return() {
        assert_outline_contains("void f(void) { return; }", "ReturnStmt: (void)");
    }

    // =========================================
    // Expressions
    // =========================================

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_outline_contains(
            "int f(void) { return 1 - 2 - 3; }",
            "\
BinaryOp: MINUS
            Left:
              BinaryOp: MINUS
                Left:
                  Number: 1
                Right:
                  Number: 2
            Right:
              Number: 3
",
        );
    }

    #[test]
    fn test_chained_assignment() {
        let expr = parse_expression_source("a = b[1] = c").unwrap();
        let Expr::Assign(outer) = expr else {
            panic!("Expected AssignExpr");
        };
        assert_eq!(outer.target.name, "a");
        assert_eq!(outer.value.kind(), NodeKind::AssignExpr);
    }

    #[test]
    fn test_call_in_index() {
        assert_parses("void f(void) { a[g(1, 2)] = h(a[0]); }");
    }
}


/// Path of a sample program in `programs/`
#[cfg(test)]
fn program_path(filename: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("programs").join(filename)
}

#[cfg(test)]
mod program_tests {
    use super::*;
    use cminus_parser::{AstNode, Declaration};

    fn compile_program(filename: &str) -> CompileResult {
        let path = program_path(filename);
        compile_file(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    #[test]
    fn test_program_gcd() {
        let result = compile_program("gcd.cm");
        assert!(result.success, "gcd.cm failed to parse: {:?}", result.error);

        let program = result.program.unwrap();
        let names: Vec<&str> = program.declarations.iter().map(Declaration::name).collect();
        assert_eq!(names, vec!["gcd", "main"]);
        assert_eq!(program.declarations[1].line(), 10);
    }

    #[test]
    fn test_program_sort() {
        let result = compile_program("sort.cm");
        assert!(result.success, "sort.cm failed to parse: {:?}", result.error);

        let program = result.program.unwrap();
        assert_eq!(program.declarations.len(), 4);
        let Declaration::Fun(minloc) = &program.declarations[1] else {
            panic!("Expected FunDeclaration");
        };
        assert_eq!(minloc.params.len(), 3);
        assert!(minloc.params[0].is_array);
        assert_eq!(minloc.body.local_declarations.len(), 3);
        assert_eq!(minloc.body.statements.len(), 5);
    }

    #[test]
    fn test_program_fact() {
        let result = compile_program("fact.cm");
        assert!(result.success, "fact.cm failed to parse: {:?}", result.error);

        let outline = result.outline.unwrap();
        assert!(outline.contains("ArrayDeclaration: int memo[13]"));
        assert!(outline.contains("SimpleExpression (NE):"));
        assert!(outline.contains("Call: factiter"));
    }

    #[test]
    fn test_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.cm");
        std::fs::write(&path, "int f(void)\n{\n  return 1 < 2 < 3;\n}\n").unwrap();

        let result = compile_file(&path).unwrap();
        assert!(!result.success);

        let source = std::fs::read_to_string(&path).unwrap();
        let file = SourceFile::new(path.display().to_string(), source);
        let rendered = render_error(&file, &result).unwrap();
        assert!(rendered.contains(&format!("--> {}:3:16", path.display())));

        let good = dir.path().join("good.cm");
        std::fs::write(&good, "int x;\n").unwrap();
        assert!(compile_file(&good).unwrap().success);
        assert!(compile_file(&dir.path().join("missing.cm")).is_err());
    }
}
