//! Shared submission fixtures
#![allow(dead_code)]

/// Formal, connective-heavy prose
pub const FORMAL_TEXT: &str = r#"Artificial intelligence is a transformative technology that has revolutionized numerous sectors of the modern economy. Furthermore, it presents unprecedented opportunities for organizations to optimize their operational efficiency. Moreover, the integration of intelligent systems enables institutions to facilitate data-driven decision making processes. Consequently, businesses can leverage these capabilities to establish a sustainable competitive advantage. Additionally, the implementation of machine learning algorithms helps teams demonstrate measurable value. Therefore, leaders should utilize these tools to acquire deeper insight into their operations."#;

/// Casual prose with contractions and varied sentence lengths
pub const INFORMAL_TEXT: &str = r#"Hey! So I was working on this assignment and honestly it was pretty tough. I tried a few different approaches but kept getting errors. Finally figured it out after looking at the lecture notes again. The code is kinda messy but it works lol. Didn't expect that. We'll see what you think, I'm not sure it's right but I've tried my best and I can't do more tonight."#;

/// Three documented, typed functions, two wrapped in try blocks
pub const DOCUMENTED_CODE: &str = r#"def calculate_fibonacci_sequence(n: int) -> list:
    """
    This function calculates the Fibonacci sequence up to n terms.

    Args:
        n (int): The number of terms to generate

    Returns:
        list: A list containing the Fibonacci sequence
    """
    try:
        sequence = [0, 1]
        for i in range(2, n):
            sequence.append(sequence[i - 1] + sequence[i - 2])
        return sequence[:n]
    except Exception as e:
        raise RuntimeError(f"Error calculating sequence: {e}")


def process_data(input_data: dict) -> dict:
    """
    This function processes the input data and returns the result.

    Args:
        input_data (dict): The data to process

    Returns:
        dict: The processed result
    """
    try:
        return {key: value * 2 for key, value in input_data.items()}
    except Exception as e:
        print(f"Error: {e}")
        return {}


def format_report(values: list) -> str:
    """
    This function formats the values into a readable report.

    Args:
        values (list): The values to format

    Returns:
        str: The formatted report
    """
    return ", ".join(str(value) for value in values)
"#;

/// Sparse comments, no docstrings or annotations
pub const STUDENT_CODE: &str = r#"# my fibonacci function
def fib(n):
    # start with 0 and 1
    a, b = 0, 1
    result = []

    # loop n times
    for _ in range(n):
        result.append(a)
        a, b = b, a + b  # this part was tricky!

    return result

# test it
print(fib(10))
"#;

/// Undocumented single-line functions
pub const ONE_LINERS: &str = r#"def add(a, b): return a + b
def sub(a, b): return a - b
def mul(a, b): return a * b
def div(a, b): return a / b
print(add(1, 2), sub(5, 3), mul(2, 4), div(9, 3))
"#;
