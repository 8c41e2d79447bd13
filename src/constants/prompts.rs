/// Instructions for turning raw SOP text into a structured training package.
/// The completion service must return bare JSON matching TrainingPackage;
/// anything else is treated as "no package produced".
pub const TRAINING_PACKAGE_PROMPT: &str = r#"You are an SOP training content generator. Turn the SOP text below into a training package.

Return ONLY a single valid JSON object with exactly these fields:

{
 "summary": "Engaging summary of roughly 120 words",
 "steps": ["6 key steps"],
 "warnings": ["4 safety warnings"],
 "checklist": ["5 checklist items"]
}

Rules:
- Every entry must be grounded in the SOP text; do not invent procedures.
- No prose, no markdown fences, no commentary outside the JSON object.
- All values are plain strings; steps, warnings and checklist are arrays of strings."#;

/// Instructions for generating an adaptive quiz. The weak-areas block and
/// question count are appended by the quiz generator at call time.
pub const QUIZ_GENERATOR_PROMPT: &str = r#"You are an SOP training quiz generator.

Return ONLY a single valid JSON object in this shape:

{
 "questions":[
   {
     "type":"mcq|tf|short|scenario",
     "question":"...",
     "choices":["A)...","B)...","C)...","D)..."],
     "answer":"...",
     "topic":"short label of concept tested"
   }
 ]
}

Rules:
- Mix true/false, multiple choice, short answer and scenario questions.
- Include "choices" ONLY for mcq questions; omit the field for every other type.
- Provide exactly one correct answer string per question.
- Provide a short topic label for each question naming the concept it tests.
- Every question must be answerable from the SOP text alone.
- No prose, no markdown fences, no commentary outside the JSON object."#;

/// Weak-area bias rule, included only when the trainee has weak topics.
pub const WEAK_AREA_FOCUS_RULE: &str =
    "At least 60% of questions must focus on the weak areas listed above.";
