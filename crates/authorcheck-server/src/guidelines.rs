//! Ethical AI usage guidelines served to students and instructors

use serde_json::{json, Value};

/// Guidelines document
pub fn document() -> Value {
    json!({
        "title": "AI Usage Guidelines for Students",
        "version": "1.0",
        "categories": {
            "appropriate_usage": {
                "description": "Acceptable ways to use AI tools",
                "examples": [
                    "Using AI to understand complex concepts",
                    "Getting help with debugging errors",
                    "Asking for explanations of programming concepts",
                    "Using AI to improve code you wrote (with understanding)",
                    "Research and exploration of topics"
                ],
                "requirements": [
                    "Must understand all AI-assisted content",
                    "Should be able to explain your work",
                    "Declare AI usage when submitting"
                ]
            },
            "questionable_usage": {
                "description": "Usage that requires careful consideration",
                "examples": [
                    "Having AI generate significant portions of code",
                    "Using AI to write paragraphs without editing",
                    "Heavily relying on AI for problem-solving"
                ],
                "requirements": [
                    "Discuss with instructor first",
                    "Be prepared to demonstrate understanding",
                    "Must declare usage explicitly"
                ]
            },
            "inappropriate_usage": {
                "description": "Unacceptable use of AI tools",
                "examples": [
                    "Submitting AI-generated work as your own",
                    "Using AI to complete entire assignments",
                    "Copying AI output without understanding",
                    "Not declaring AI usage when required"
                ],
                "consequences": [
                    "First offense: Educational conversation, re-submission required",
                    "Second offense: Grade penalty, mandatory comprehension verification",
                    "Serious violations: Academic integrity review"
                ]
            }
        },
        "declaration_policy": {
            "required": true,
            "how_to_declare": "Check the AI usage box when submitting and describe how you used AI tools",
            "honesty_reward": "Students who honestly declare AI usage are treated more leniently"
        },
        "verification_process": {
            "when_required": "When AI usage score is high (>60%)",
            "what_to_expect": [
                "Answer questions about your submission",
                "Explain key concepts used in your work",
                "Demonstrate understanding through discussion"
            ],
            "purpose": "Ensure you learned from the assignment, not just got answers"
        }
    })
}
