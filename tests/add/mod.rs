mod adding_an_unchanged_file_is_a_no_op;
mod adding_invalid_paths_is_reported_per_file;
mod re_adding_a_vanished_new_file_unstages_it;
