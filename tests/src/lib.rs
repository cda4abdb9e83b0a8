mod persistence;
mod scan;
