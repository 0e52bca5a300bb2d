//! Built-in question bank for the boss fight.
//! Every entry has exactly four answers; `correct` indexes into them.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub answers: [&'static str; 4],
    pub correct: usize,
}

const fn q(prompt: &'static str, answers: [&'static str; 4], correct: usize) -> Question {
    Question { prompt, answers, correct }
}

pub const QUESTIONS: &[Question] = &[
    q("Which keyword declares a constant in TypeScript?", ["var", "let", "const", "static"], 2),
    q("What does HTML stand for?", ["HyperText Markup Language", "High Tech Modern Language", "Hyperlink Text Machine Language", "Home Tool Markup Language"], 0),
    q("Which CSS property changes the text color?", ["font-color", "color", "text-style", "foreground"], 1),
    q("What is 7 * 8?", ["54", "56", "58", "64"], 1),
    q("Which HTTP status code means 'Not Found'?", ["200", "301", "404", "500"], 2),
    q("Which array method adds an item to the end?", ["shift", "push", "unshift", "slice"], 1),
    q("Which data structure is first-in, first-out?", ["Stack", "Tree", "Queue", "Graph"], 2),
    q("What does CPU stand for?", ["Central Processing Unit", "Computer Power Unit", "Core Program Utility", "Central Peripheral Unit"], 0),
    q("How many bits are in a byte?", ["4", "8", "16", "32"], 1),
    q("Which tag creates a hyperlink in HTML?", ["<link>", "<href>", "<a>", "<url>"], 2),
    q("What is the binary value of decimal 5?", ["101", "110", "111", "100"], 0),
    q("Which one is a version control system?", ["Docker", "Git", "Node", "Sass"], 1),
    q("Which operator checks strict equality in JavaScript?", ["==", "=", "===", "!="], 2),
    q("What does the 'S' in HTTPS stand for?", ["Simple", "Secure", "Server", "Static"], 1),
    q("Which loop always runs its body at least once?", ["for", "while", "do...while", "for...of"], 2),
    q("Which of these is not a primitive type in JavaScript?", ["string", "boolean", "object", "number"], 2),
];
