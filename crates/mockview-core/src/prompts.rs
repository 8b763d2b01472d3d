//! Prompt templates sent to the language model.
//!
//! Grade feedback has one template per grade; the template is chosen from
//! the grade alone, never from the raw score.

use crate::grade::Grade;
use crate::model::{Difficulty, InterviewConfig, QUESTION_COUNT};

/// System prompt shared by all coaching requests.
pub const COACH_SYSTEM_PROMPT: &str = "You are an experienced hiring manager and interview coach. \
Be specific to the role being discussed and mention concrete skills, tools, and methodologies.";

fn difficulty_instructions(difficulty: Difficulty, role: &str) -> String {
    match difficulty {
        Difficulty::Easy => format!(
            "Make questions in-depth and comprehensive, focusing on:
- Fundamental knowledge and core skills required for {role}
- Basic situational scenarios they might encounter
- Their understanding of key tools, processes, and methodologies
- Past experiences demonstrating foundational competencies
- How they approach learning and development in this field
Even at easy difficulty, questions should require thoughtful, substantial answers."
        ),
        Difficulty::Medium => format!(
            "Make questions thoroughly in-depth and detailed, focusing on:
- Advanced application of skills and knowledge specific to {role}
- Complex scenarios requiring problem-solving and critical thinking
- Multi-faceted challenges that test several competencies at once
- Leadership, collaboration, and stakeholder management situations
- Strategic thinking and decision-making processes
- Detailed technical or functional expertise
Questions should require comprehensive answers with specific examples and deep reflection."
        ),
        Difficulty::Hard => format!(
            "Make questions extremely in-depth and challenging, focusing on:
- Complex, multi-layered scenarios with competing priorities
- Strategic decisions under pressure with incomplete information
- Advanced expertise in specialized areas of {role}
- Organizational impact and transformational change
- Crisis situations and difficult stakeholder dynamics
- Innovation, thought leadership, and industry expertise
- Ethical dilemmas and controversial decisions
Questions should demand mastery-level thinking and extensive, nuanced responses."
        ),
    }
}

/// Prompt asking for a full set of numbered interview questions.
pub fn question_prompt(config: &InterviewConfig) -> String {
    let role = config.job_role.trim();
    let n = QUESTION_COUNT;
    let format_lines = (1..=n)
        .map(|i| format!("{i}. [Question here]"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an experienced hiring manager conducting an interview for a {role} position at the {level} level.

First, think about the key requirements, skills, and responsibilities typically needed for a {role} role at this level. Then generate exactly {n} highly specific, in-depth interview questions that directly assess whether the candidate meets those requirements.

Difficulty Level Instructions:
{instructions}

Requirements:
- Generate exactly {n} questions
- Tailor each question to {role}: use the terminology, tools, methodologies, and scenarios of this role
- Questions should need 2-3 minutes of speaking to answer well
- Include questions that reveal hands-on experience with core responsibilities
- Progress from foundational to more complex
- Mix behavioral, technical, and situational questions
- Avoid generic questions that could apply to any job

Return ONLY the {n} questions, one per line, numbered 1-{n}. No preamble or explanations.

Format:
{format_lines}",
        level = config.job_level.description(),
        instructions = difficulty_instructions(config.difficulty, role),
    )
}

/// Prompt asking for coaching on one answer.
pub fn answer_feedback_prompt(config: &InterviewConfig, question: &str, answer: &str) -> String {
    let role = config.job_role.trim();
    format!(
        "You are an expert interview coach giving feedback to a candidate interviewing for a {role} position at the {level} level.

Question Asked: \"{question}\"

Candidate's Answer: \"{answer}\"

Analyze this answer and give specific, actionable feedback for their next interview. Cover:

1. What hiring managers for {role} roles look for in answers to this type of question
2. What the candidate did well
3. What the candidate missed or could improve
4. What they SHOULD have said instead: 2-3 concrete talking points, skills, technologies, or experiences
5. How to structure a better answer (STAR method or similar)

Format your response as:
STRENGTHS: [What they did well]
GAPS: [What's missing from their answer]
WHAT TO SAY INSTEAD: [Specific examples of better talking points]
IMPROVEMENT TIPS: [How to structure better answers]

Be specific to {role}.",
        level = config.job_level,
    )
}

fn numbered_answers<S: AsRef<str>>(answers: &[S]) -> String {
    answers
        .iter()
        .enumerate()
        .map(|(i, a)| format!("Question {}: {}", i + 1, a.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt asking for overall coaching, chosen by grade.
pub fn grade_feedback_prompt<S: AsRef<str>>(
    grade: Grade,
    score: u32,
    config: &InterviewConfig,
    answers: &[S],
) -> String {
    let role = config.job_role.trim();
    let level = config.job_level;
    let answers = numbered_answers(answers);

    match grade {
        Grade::F => format!(
            "You are an expert career coach analyzing a failed interview performance (score: {score}/100) for a {role} position at {level} level.

The candidate's answers were:
{answers}

Provide comprehensive, actionable feedback:

1. ASSESSMENT: A brief, honest assessment of why they failed (2-3 sentences)

2. WHAT HIRING MANAGERS LOOK FOR: 5-7 specific skills, qualities, experiences, and talking points that {role} hiring managers expect at the {level} level. Name actual tools, technologies, methodologies, and project types.

3. WHAT WAS MISSING: What the answers lacked compared to what employers expect.

4. WHAT THEY SHOULD HAVE SAID: 4-5 concrete talking points, such as technologies to mention, projects to reference, metrics to quantify, and terminology to demonstrate.

5. ACTION PLAN: 3-4 concrete steps to improve.

Be encouraging but honest."
        ),
        Grade::C => format!(
            "You are an expert career coach analyzing an interview that needs more practice (score: {score}/100, Grade C) for a {role} position at {level} level.

The candidate's answers were:
{answers}

Provide balanced, specific feedback:

1. STRENGTHS: 2-3 specific strong points in their answers

2. GAPS & WEAKNESSES: 2-3 areas where answers fell short of what {role} hiring managers expect

3. WHAT THEY MISSED: Key points, experiences, or skills that were absent

4. WHAT THEY SHOULD HAVE SAID INSTEAD: 4-5 stronger talking points, including better framing, tools to mention, metrics to emphasize, and industry terminology

5. HOW CLOSE TO PASSING: What improvements would get them to Grade B or A

6. NEXT STEPS: 3 actionable tips with concrete examples of what to prepare

Be constructive and specific."
        ),
        Grade::B => format!(
            "You are an expert career coach analyzing a strong interview (score: {score}/100, Grade B) for a {role} position at {level} level.

The candidate's answers were:
{answers}

Provide encouraging, refinement-focused feedback:

1. WHAT YOU DID EXCELLENTLY: 3-4 specific strengths and why they matter to {role} hiring managers

2. WHAT {role} HIRING MANAGERS LOVED: Elements of the answers that match what employers seek

3. WHAT WOULD PUSH YOU TO GRADE A: Specific talking points, examples, or framing that would make the answers stronger

4. MINOR POLISH SUGGESTIONS: 2-3 ways to elevate answers, such as metrics to add, stronger framing, or better storytelling structure

5. FINAL ADVICE: How to stay confident through the final interview stages

Be positive and give actionable ways to improve further."
        ),
        Grade::A => format!(
            "You are an expert career coach analyzing an excellent interview (score: {score}/100, Grade A) for a {role} position at {level} level.

The candidate's answers were:
{answers}

Provide validating, confidence-building feedback:

1. OUTSTANDING PERFORMANCE: 4-5 specific strengths and what {role} hiring managers want to hear

2. WHY HIRING MANAGERS WILL LOVE YOU: The skills, examples, and techniques (storytelling, metrics, structure) that make them the ideal candidate

3. WHAT YOU DID THAT MOST CANDIDATES DON'T: What set them apart

4. AREAS OF ABSOLUTE PERFECTION: Moments in their answers that were textbook excellent

5. TINY REFINEMENTS (IF ANY): Only truly minor areas, stated specifically

6. YOU'RE READY: A confidence-building closing message

Be validating and specific about why they succeeded."
        ),
    }
}
