//! End-to-end emission tests: source text through classifier and builder,
//! then asserted against the exact generated Python.

use choco_builder::build;
use choco_classifier::classify;
use choco_codegen::generate;
use choco_types::SourceFile;

fn transpile(source: &str) -> String {
    let source = SourceFile::new("test.choco", source);
    let classified = classify(&source).expect("classification should succeed");
    let program = build(&classified).expect("build should succeed");
    generate(&program).expect("generation should succeed")
}

#[test]
fn test_straight_line_program() {
    let output = transpile("memory 5\nadd 3\noutput raw\n");
    assert_eq!(
        output,
        "import sys\n\
         \n\
         memory = [0] * 5\n\
         pointer = 0\n\
         memory[pointer] += 3\n\
         sys.stdout.write(str(memory[pointer]))\n"
    );
}

#[test]
fn test_loop_body_is_one_level_deeper() {
    let output = transpile("memory 1\nadd 2\nloop\nsub 1\noutput raw\nend loop\n");
    assert_eq!(
        output,
        "import sys\n\
         \n\
         memory = [0] * 1\n\
         pointer = 0\n\
         memory[pointer] += 2\n\
         while memory[pointer] != 0:\n\
         \x20   memory[pointer] -= 1\n\
         \x20   sys.stdout.write(str(memory[pointer]))\n"
    );
}

#[test]
fn test_nested_blocks_indentation() {
    let output = transpile(
        "memory 2\nloop\nif 1\nadd 1\nend if\nsub 1\nend loop\n",
    );
    assert_eq!(
        output,
        "import sys\n\
         \n\
         memory = [0] * 2\n\
         pointer = 0\n\
         while memory[pointer] != 0:\n\
         \x20   if memory[pointer] == 1:\n\
         \x20       memory[pointer] += 1\n\
         \x20   memory[pointer] -= 1\n"
    );
}

#[test]
fn test_empty_loop_gets_pass() {
    let output = transpile("memory 1\nloop\nend loop\n");
    assert_eq!(
        output,
        "import sys\n\
         \n\
         memory = [0] * 1\n\
         pointer = 0\n\
         while memory[pointer] != 0:\n\
         \x20   pass\n"
    );
}

#[test]
fn test_empty_nested_conditional_gets_pass_at_body_depth() {
    let output = transpile("memory 1\nloop\nif 3\nend if\nend loop\n");
    assert_eq!(
        output,
        "import sys\n\
         \n\
         memory = [0] * 1\n\
         pointer = 0\n\
         while memory[pointer] != 0:\n\
         \x20   if memory[pointer] == 3:\n\
         \x20       pass\n"
    );
}

#[test]
fn test_pointer_and_io_statements() {
    let output = transpile(
        "memory 8\ninput raw\nright\ninput ascii\nleft\ngoto 7\noutput ascii\n",
    );
    assert_eq!(
        output,
        "import sys\n\
         \n\
         memory = [0] * 8\n\
         pointer = 0\n\
         memory[pointer] = int(input())\n\
         pointer += 1\n\
         memory[pointer] = ord(sys.stdin.read(1))\n\
         pointer -= 1\n\
         pointer = 7\n\
         sys.stdout.write(chr(memory[pointer]))\n"
    );
}

#[test]
fn test_generation_is_deterministic() {
    let source = SourceFile::new("test.choco", "memory 3\nloop\nsub 1\nend loop\n");
    let program = build(&classify(&source).unwrap()).unwrap();
    let first = generate(&program).unwrap();
    for _ in 0..10 {
        assert_eq!(generate(&program).unwrap(), first);
    }
}
