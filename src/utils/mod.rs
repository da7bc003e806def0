pub mod prompt_template;
