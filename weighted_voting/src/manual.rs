/*!

This is the long-form manual for `weighted_voting` and `wpick`.

## Configuration file

The options are read from a JSON file (`food.json` by default). Every key of the top-level
object is an option, in the order it is written, with the following exceptions:
* keys that contain `//` are comments and are ignored
* keys that start with `_` are settings

The value attached to an option is not used.

```json
{
    "// Options, numbered from 0": "",
    "72": "",
    "Ramen": "",
    "Tacos": "",
    "_max_choices": 3
}
```

### Settings

* `_max_choices` (required) the maximum number of indices in one ballot. It may be written as a
  number or as a string containing a number.
* `_shortcut` (optional) an object `{"command": "-72", "option": 0, "count": 3}`. Typing the
  command closes the vote with a single ballot containing `count` times the given option.
  When missing, the values above are used.
* `_random_seed` (optional) a number. When set, the same ballots always give the same
  candidates.

## Voting

Each voter types the indices of the options, separated by spaces, for example `1 1 2`.
Repeating an index gives more weight to that option. The following commands are also
available:
* `-1` close the vote
* `-t` show the table of options again
* `-r` restart the vote from scratch
* `-z` cancel the last ballot
* the shortcut command (by default `-72`)

When the vote is closed, all the indices are merged together and up to 3 distinct candidates
are drawn at random. An option is drawn with a probability proportional to its number of
votes. If nobody voted, every option has the same chance.

*/
