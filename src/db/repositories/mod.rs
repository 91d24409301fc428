mod learning_sessions;
