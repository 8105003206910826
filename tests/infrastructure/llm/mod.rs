mod llm_collaborators_test;
