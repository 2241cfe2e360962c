mod run;
mod state;
