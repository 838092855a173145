mod image;
mod ingredient;
